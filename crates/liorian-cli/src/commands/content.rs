//! Catalog management CLI commands.

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use liorian_content::ContentCatalog;
use liorian_core::config::AppConfig;
use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_entity::content::{Course, CourseStatus, Post, Service};

use crate::output::{self, OutputFormat};

/// Arguments for content commands
#[derive(Debug, Args)]
pub struct ContentArgs {
    /// Content subcommand
    #[command(subcommand)]
    pub command: ContentCommand,
}

/// Which catalog collection to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollectionArg {
    /// Training courses
    Courses,
    /// Consulting services
    Services,
    /// Blog posts
    Posts,
}

/// Content subcommands
#[derive(Debug, Subcommand)]
pub enum ContentCommand {
    /// List a collection
    List {
        /// Collection to list
        #[arg(value_enum)]
        collection: CollectionArg,
        /// Include inactive and draft entries
        #[arg(short, long)]
        all: bool,
    },
    /// Add a course
    AddCourse(AddCourseArgs),
    /// Delete one entry by id
    Delete {
        /// Collection holding the entry
        #[arg(value_enum)]
        collection: CollectionArg,
        /// Entry id
        id: u64,
    },
    /// Replace every collection with the built-in defaults
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Fields of a new course
#[derive(Debug, Args)]
pub struct AddCourseArgs {
    /// Course name
    pub name: String,
    /// Short description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Duration label, e.g. "12 weeks"
    #[arg(long, default_value = "")]
    pub duration: String,
    /// Level label, e.g. "Beginner"
    #[arg(long, default_value = "")]
    pub level: String,
    /// Price label
    #[arg(long, default_value = "")]
    pub price: String,
    /// Instructor name
    #[arg(long, default_value = "")]
    pub instructor: String,
    /// Create the course hidden
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct CourseRow {
    id: u64,
    name: String,
    level: String,
    duration: String,
    price: String,
    instructor: String,
    status: String,
}

impl From<&Course> for CourseRow {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            level: c.level.clone(),
            duration: c.duration.clone(),
            price: c.price.clone(),
            instructor: c.instructor.clone(),
            status: format!("{:?}", c.status),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct ServiceRow {
    id: u64,
    title: String,
    icon: String,
    features: usize,
    status: String,
}

impl From<&Service> for ServiceRow {
    fn from(s: &Service) -> Self {
        Self {
            id: s.id,
            title: s.title.clone(),
            icon: s.icon.clone(),
            features: s.features.len(),
            status: format!("{:?}", s.status),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct PostRow {
    id: u64,
    title: String,
    author: String,
    date: String,
    category: String,
    status: String,
}

impl From<&Post> for PostRow {
    fn from(p: &Post) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            author: p.author.clone(),
            date: p.date.clone(),
            category: p.category.clone(),
            status: format!("{:?}", p.status),
        }
    }
}

/// Execute content commands
pub async fn execute(
    args: &ContentArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let store = super::open_store(config).await?;
    let catalog = ContentCatalog::load(store, config.content.clone()).await?;

    match &args.command {
        ContentCommand::List { collection, all } => {
            list(&catalog, *collection, *all, format).await;
        }
        ContentCommand::AddCourse(input) => {
            let course = catalog.add_course(new_course(input)).await?;
            match format {
                OutputFormat::Json => output::print_json(&course),
                OutputFormat::Table => {
                    output::print_success(&format!(
                        "Course '{}' added with id {}",
                        course.name, course.id
                    ));
                }
            }
        }
        ContentCommand::Delete { collection, id } => {
            let title = match collection {
                CollectionArg::Courses => catalog.delete_course(*id).await?.name,
                CollectionArg::Services => catalog.delete_service(*id).await?.title,
                CollectionArg::Posts => catalog.delete_post(*id).await?.title,
            };
            output::print_success(&format!("Deleted {id}: {title}"));
        }
        ContentCommand::Reset { yes } => {
            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("Replace all courses, services and posts with the defaults?")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
                if !confirm {
                    output::print_warning("Reset cancelled");
                    return Ok(());
                }
            }
            catalog.clear_storage_and_reset().await?;
            output::print_success("Catalog reset to defaults");
        }
    }

    Ok(())
}

async fn list(
    catalog: &ContentCatalog,
    collection: CollectionArg,
    all: bool,
    format: OutputFormat,
) {
    match collection {
        CollectionArg::Courses => {
            let items = if all {
                catalog.get_all_courses().await
            } else {
                catalog.get_courses().await
            };
            let rows: Vec<CourseRow> = items.iter().map(CourseRow::from).collect();
            output::print_list(&rows, format);
        }
        CollectionArg::Services => {
            let items = if all {
                catalog.get_all_services().await
            } else {
                catalog.get_services().await
            };
            let rows: Vec<ServiceRow> = items.iter().map(ServiceRow::from).collect();
            output::print_list(&rows, format);
        }
        CollectionArg::Posts => {
            let items = if all {
                catalog.get_all_posts().await
            } else {
                catalog.get_posts().await
            };
            let rows: Vec<PostRow> = items.iter().map(PostRow::from).collect();
            output::print_list(&rows, format);
        }
    }
}

fn new_course(input: &AddCourseArgs) -> Course {
    Course {
        id: 0,
        name: input.name.clone(),
        description: input.description.clone(),
        duration: input.duration.clone(),
        level: input.level.clone(),
        price: input.price.clone(),
        instructor: input.instructor.clone(),
        status: if input.inactive {
            CourseStatus::Inactive
        } else {
            CourseStatus::Active
        },
    }
}
