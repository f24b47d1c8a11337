//! Default categories and checklists installed by the seed command.

pub struct SeedCategory {
    pub name: &'static str,
    pub color: &'static str,
}

pub struct SeedStep {
    pub title: &'static str,
    pub description: &'static str,
    pub duration_minutes: i32,
}

pub struct SeedChecklist {
    pub title: &'static str,
    pub description: &'static str,
    /// Name of an entry in [`CATEGORIES`].
    pub category: &'static str,
    /// Stored in slice order, so `order_index` is the position.
    pub steps: &'static [SeedStep],
}

pub const CATEGORY_BUSINESS_ANALYSIS: &str = "Business Analysis";
pub const CATEGORY_MARKETING: &str = "Marketing";
pub const CATEGORY_DEVELOPMENT: &str = "Development";
pub const CATEGORY_QUALITY_ASSURANCE: &str = "Quality Assurance";

pub const CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: CATEGORY_BUSINESS_ANALYSIS,
        color: "#3b82f6",
    },
    SeedCategory {
        name: CATEGORY_MARKETING,
        color: "#10b981",
    },
    SeedCategory {
        name: CATEGORY_DEVELOPMENT,
        color: "#8b5cf6",
    },
    SeedCategory {
        name: CATEGORY_QUALITY_ASSURANCE,
        color: "#f59e0b",
    },
];

const fn step(title: &'static str, description: &'static str, duration_minutes: i32) -> SeedStep {
    SeedStep {
        title,
        description,
        duration_minutes,
    }
}

pub const DEFAULT_CHECKLISTS: &[SeedChecklist] = &[
    SeedChecklist {
        title: "Project Launch Checklist",
        description: "A comprehensive checklist for launching a new project successfully",
        category: CATEGORY_BUSINESS_ANALYSIS,
        steps: &[
            step(
                "Define Project Scope",
                "Document the project objectives, deliverables, and boundaries",
                240,
            ),
            step(
                "Identify Stakeholders",
                "List all project stakeholders and their roles/responsibilities",
                120,
            ),
            step(
                "Create Project Timeline",
                "Develop a detailed timeline with milestones and deadlines",
                180,
            ),
            step(
                "Allocate Resources",
                "Assign team members, budget, and tools needed",
                120,
            ),
            step(
                "Design System Architecture",
                "Create technical design and architecture documents",
                480,
            ),
            step(
                "Development Phase",
                "Implement core features according to specifications",
                960,
            ),
            step(
                "Internal Testing",
                "Perform unit tests, integration tests, and QA review",
                480,
            ),
            step(
                "User Acceptance Testing",
                "Conduct UAT with stakeholders and gather feedback",
                240,
            ),
            step(
                "Prepare Launch Documentation",
                "Create user guides, release notes, and support docs",
                180,
            ),
            step(
                "Deploy to Production",
                "Execute deployment plan and verify system health",
                120,
            ),
        ],
    },
    SeedChecklist {
        title: "Marketing Campaign Checklist",
        description: "Step-by-step guide for planning and executing marketing campaigns",
        category: CATEGORY_MARKETING,
        steps: &[
            step(
                "Define Campaign Objectives",
                "Set clear, measurable goals for the campaign (awareness, leads, sales)",
                120,
            ),
            step(
                "Identify Target Audience",
                "Research and define buyer personas and audience segments",
                180,
            ),
            step(
                "Develop Key Messages",
                "Create compelling value propositions and messaging framework",
                240,
            ),
            step(
                "Create Content Assets",
                "Produce blog posts, graphics, videos, and other campaign materials",
                480,
            ),
            step(
                "Select Distribution Channels",
                "Choose appropriate channels (social, email, paid, organic)",
                90,
            ),
            step(
                "Set Up Tracking",
                "Configure analytics, UTM parameters, and conversion tracking",
                120,
            ),
            step(
                "Launch Campaign",
                "Execute the campaign across all selected channels",
                60,
            ),
            step(
                "Monitor & Optimize",
                "Track performance metrics and adjust strategy as needed",
                240,
            ),
        ],
    },
    SeedChecklist {
        title: "Root-Cause Analysis",
        description: "Systematic approach to identify the underlying causes of problems",
        category: CATEGORY_BUSINESS_ANALYSIS,
        steps: &[
            step(
                "Define the Problem",
                "Clearly state what happened, when, where, and impact",
                60,
            ),
            step(
                "Collect Data",
                "Gather all relevant information, logs, reports, and observations",
                180,
            ),
            step(
                "Identify Possible Causes",
                "Brainstorm potential causes using techniques like 5 Whys or Fishbone",
                120,
            ),
            step(
                "Analyze Root Cause",
                "Determine the fundamental cause by analyzing evidence",
                180,
            ),
            step(
                "Develop Solutions",
                "Create corrective and preventive action plans",
                120,
            ),
            step(
                "Implement & Verify",
                "Execute solutions and monitor to ensure problem is resolved",
                240,
            ),
        ],
    },
];
