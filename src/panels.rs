//! Portfolio content behind each section.

use crate::components::Section;

pub struct Entry {
    pub heading: &'static str,
    pub detail: &'static str,
    pub tags: &'static [&'static str],
}

pub struct Panel {
    pub title: &'static str,
    pub entries: &'static [Entry],
}

const SKILLS: &[Entry] = &[
    Entry {
        heading: "Languages",
        detail: "",
        tags: &["Python", "JavaScript", "TypeScript", "Java", "SQL"],
    },
    Entry {
        heading: "Frameworks",
        detail: "",
        tags: &["React", "Node.js", "FastAPI", "Django", "Express"],
    },
    Entry {
        heading: "DevOps",
        detail: "",
        tags: &["Docker", "Kubernetes", "Jenkins", "GitHub Actions", "Terraform"],
    },
    Entry {
        heading: "Databases",
        detail: "",
        tags: &["PostgreSQL", "MongoDB", "Redis", "MySQL"],
    },
    Entry {
        heading: "Cloud",
        detail: "",
        tags: &["AWS", "Azure", "GCP", "Vercel", "Netlify"],
    },
];

const EXPERIENCE: &[Entry] = &[
    Entry {
        heading: "Software Engineer, Bitsilica (2024 - Present)",
        detail: "Full-stack development and DevOps practices. Building scalable applications and CI/CD pipelines.",
        tags: &[],
    },
    Entry {
        heading: "Software Developer, Aubergine Design Works (2024)",
        detail: "Modern web applications with React and Node.js, built together with design teams.",
        tags: &[],
    },
    Entry {
        heading: "Full Stack Intern, Rejolt EdTech (2022)",
        detail: "Educational platform features, agile development and code reviews.",
        tags: &[],
    },
];

const PROJECTS: &[Entry] = &[
    Entry {
        heading: "Trackon",
        detail: "CI/CD pipelines, infrastructure as code and automated deployments.",
        tags: &["Docker", "Kubernetes", "Jenkins", "Terraform"],
    },
    Entry {
        heading: "Management Portal",
        detail: "Resource management web application with role-based access control.",
        tags: &["React", "Node.js", "PostgreSQL", "JWT"],
    },
    Entry {
        heading: "Heart Health Predictor",
        detail: "Machine learning model predicting heart disease risk from patient data.",
        tags: &["Python", "Scikit-learn", "Pandas", "Flask"],
    },
    Entry {
        heading: "Android Security App",
        detail: "Mobile application for device security and privacy protection.",
        tags: &["Java", "Android SDK", "SQLite", "Encryption"],
    },
];

const CONTACT: &[Entry] = &[Entry {
    heading: "Elsewhere",
    detail: "Tab into the form below to leave a message. Enter sends, Esc leaves the form.",
    tags: &["GitHub", "LinkedIn", "Portfolio", "LeetCode"],
}];

pub const GREETING: &str = "Hey there! 👋";

/// Shown under the final score once every section is unlocked.
pub const THANK_YOU: &[&str] = &[
    "Thanks for playing through my portfolio! I'm Sai Manish, a passionate Full Stack Developer & DevOps Engineer.",
    "I love building scalable applications and automating everything. If you're looking for someone who brings both technical skills and creativity to the table, let's connect!",
    "Looking forward to hearing from you! 🚀",
];

pub const LINKS: &[&str] = &["GitHub", "LinkedIn", "contact@saimanish.dev"];

pub fn panel(section: Section) -> Panel {
    match section {
        Section::Skills => Panel {
            title: "Skills",
            entries: SKILLS,
        },
        Section::Experience => Panel {
            title: "Experience",
            entries: EXPERIENCE,
        },
        Section::Projects => Panel {
            title: "Projects",
            entries: PROJECTS,
        },
        Section::Contact => Panel {
            title: "Contact Me",
            entries: CONTACT,
        },
    }
}
