//! Entries the catalog starts with when nothing has been saved yet.

use liorian_entity::content::{Course, CourseStatus, Post, PostStatus, Service, ServiceStatus};

fn course(
    id: u64,
    name: &str,
    description: &str,
    duration: &str,
    level: &str,
    price: &str,
    instructor: &str,
) -> Course {
    Course {
        id,
        name: name.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        level: level.to_string(),
        price: price.to_string(),
        instructor: instructor.to_string(),
        status: CourseStatus::Active,
    }
}

/// Default course list.
pub fn courses() -> Vec<Course> {
    vec![
        course(
            1,
            "CompTIA A+ Certification",
            "Hardware, operating systems and troubleshooting for IT support roles.",
            "12 weeks",
            "Beginner",
            "$1,299",
            "Liorian Faculty",
        ),
        course(
            2,
            "CCNA Networking",
            "Routing, switching and network fundamentals for the Cisco CCNA exam.",
            "16 weeks",
            "Intermediate",
            "$1,899",
            "Liorian Faculty",
        ),
        course(
            3,
            "AWS Cloud Practitioner",
            "Core AWS services, pricing and the shared responsibility model.",
            "8 weeks",
            "Beginner",
            "$999",
            "Liorian Faculty",
        ),
        course(
            4,
            "Security+ and Cyber Defense",
            "Threats, vulnerabilities, identity management and incident response.",
            "14 weeks",
            "Intermediate",
            "$1,599",
            "Liorian Faculty",
        ),
    ]
}

fn service(id: u64, title: &str, description: &str, icon: &str, features: &[&str]) -> Service {
    Service {
        id,
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        status: ServiceStatus::Active,
    }
}

/// Default service list.
pub fn services() -> Vec<Service> {
    vec![
        service(
            1,
            "IT Training",
            "Instructor-led certification tracks for career changers.",
            "graduation-cap",
            &["Certification prep", "Hands-on labs", "Career coaching"],
        ),
        service(
            2,
            "Staff Augmentation",
            "Placing trained graduates with partner companies.",
            "users",
            &["Vetted candidates", "Flexible contracts"],
        ),
        service(
            3,
            "Managed IT Consulting",
            "Infrastructure, cloud and security assessments for small businesses.",
            "server",
            &["Network audits", "Cloud migration", "Security reviews"],
        ),
    ]
}

/// Default blog posts.
pub fn posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            title: "Breaking into IT without a degree".to_string(),
            excerpt: "Certifications and labs that get you hired.".to_string(),
            content: "Employers increasingly hire on demonstrated skills. A+ and Network+ \
                      are the usual starting points, followed by a specialisation."
                .to_string(),
            author: "Liorian Team".to_string(),
            date: "2024-01-15".to_string(),
            category: "Careers".to_string(),
            status: PostStatus::Published,
        },
        Post {
            id: 2,
            title: "Cloud skills in demand this year".to_string(),
            excerpt: "Where AWS and Azure roles are growing.".to_string(),
            content: "Cloud practitioner certifications remain the fastest route into \
                      cloud support and operations roles."
                .to_string(),
            author: "Liorian Team".to_string(),
            date: "2024-02-02".to_string(),
            category: "Cloud".to_string(),
            status: PostStatus::Published,
        },
    ]
}
