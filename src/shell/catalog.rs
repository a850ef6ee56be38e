// catalog.rs - Project entries readable with `cat`

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

pub static PROJECTS: [Project; 3] = [
    Project {
        id: "carease",
        title: "CarEase - Car Rental Platform",
        description: "A comprehensive Java Spring Boot-based car rental platform that revolutionizes the vehicle rental experience. Features include intelligent vehicle search with advanced filtering, dynamic pricing calculator, sophisticated booking system with conflict resolution, and integrated wallet payment functionality. The system includes automated vehicle availability management, real-time notifications, user authentication, and a comprehensive admin dashboard for fleet management.",
        link: "https://drive.google.com/drive/folders/10UTWe4BlCowxywpZAhRO5hclckrsTh_u?usp=drive_link",
    },
    Project {
        id: "vault",
        title: "Vault - Banking System",
        description: "An enterprise-grade banking platform built with Spring Boot, featuring secure role-based dashboards for administrators and customers. The system integrates Custom payment gateway for seamless transactions, comprehensive account services including deposits, withdrawals, and transfers, detailed transaction history APIs with filtering capabilities, and complete microservices architecture. Platform uses MySQL, SMTP email services, and robust security implementation.",
        link: "https://drive.google.com/drive/folders/10UTWe4BlCowxywpZAhRO5hclckrsTh_u?usp=drive_link",
    },
    Project {
        id: "portfolio",
        title: "Developer Portfolio Website",
        description: "A modern, responsive portfolio website built with semantic HTML5, advanced CSS3 features (like glassmorphism design), and vanilla JavaScript for smooth interactions and optimized performance across all devices.",
        link: "#",
    },
];

pub fn find(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.id == id)
}

/// The text block printed by `cat <id>`.
pub fn describe(id: &str) -> String {
    match find(id) {
        Some(p) => format!(
            "File: {}\n------------------------------------\nDescription: {}\nLink: {}\n------------------------------------\nStatus: Read complete.",
            p.title, p.description, p.link
        ),
        None => "Error: File not found or unknown project ID.".to_string(),
    }
}
