use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    client::db::client::{Database, DatabaseCollection},
    utils::file_reader::{read_json_from_file, FileReadError},
};

pub const MONGO_URI_ENV: &str = "MONGO_URI";
pub const LOG_LEVEL_ENV: &str = "TWEET_HARVEST_LOG";

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: String::from("mongodb://localhost:27017"),
            database: Database::Twitter.to_string(),
            collection: DatabaseCollection::Tweets.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct SnscrapeSettings {
    pub program: String,
    /// Arguments placed before the query string.
    pub args: Vec<String>,
}

impl Default for SnscrapeSettings {
    fn default() -> Self {
        Self {
            program: String::from("snscrape"),
            args: vec![String::from("--jsonl"), String::from("twitter-search")],
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            file: None,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub mongo: MongoSettings,
    pub snscrape: SnscrapeSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Defaults, then the optional JSON file, then `.env` and process environment.
    pub fn load(path: Option<&Path>) -> Result<Settings, FileReadError> {
        dotenvy::dotenv().ok();
        let settings = match path {
            Some(path) => read_json_from_file::<Settings>(path)?,
            None => Settings::default(),
        };
        return Ok(settings.with_overrides(|key| std::env::var(key).ok()));
    }

    /// One-line description for the log. The mongo uri is left out since it may carry credentials.
    pub fn summary(&self) -> String {
        return format!(
            "mongo {}.{}, feed `{}`, log level {}",
            self.mongo.database, self.mongo.collection, self.snscrape.program, self.log.level
        );
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Settings {
        if let Some(uri) = lookup(MONGO_URI_ENV) {
            self.mongo.uri = uri;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.log.level = level;
        }
        return self;
    }
}
