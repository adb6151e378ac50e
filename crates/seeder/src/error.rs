use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Database error while seeding: {0}")]
    Database(#[from] database::DbError),

    #[error("Invalid progress bar template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}
