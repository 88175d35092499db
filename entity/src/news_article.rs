use std::fmt;

use sea_orm::entity::prelude::*;

use crate::validation::{self, AUTHOR_MAX, TITLE_MAX, ValidationError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "news_article")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(indexed)]
    pub published_at: DateTimeWithTimeZone,
    pub source_url: String,
    pub fetched_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.author, &self.title, &self.source_url)
    }
}

pub fn validate_fields(author: &str, title: &str, source_url: &str) -> Result<(), ValidationError> {
    validation::validate_max_chars("author", author, AUTHOR_MAX)?;
    validation::validate_required("title", title)?;
    validation::validate_max_chars("title", title, TITLE_MAX)?;
    validation::validate_source_url(source_url)?;
    Ok(())
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
