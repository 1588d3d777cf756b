use async_trait::async_trait;
use log::{error, info};
use mongodb::{options::ClientOptions, Client, Collection};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tokio::sync::OnceCell;

use crate::{
    client::settings::MongoSettings,
    commons::{error::StorageError, run_record::RunRecord, run_store::RunStore},
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, Hash, PartialEq, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Database {
    Twitter,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, Hash, PartialEq, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DatabaseCollection {
    Tweets,
}

pub async fn create_mongo_client(uri: &str) -> Result<Client, StorageError> {
    let options = ClientOptions::parse(uri).await.map_err(StorageError::Config)?;
    info!("successfully set options");
    return Client::with_options(options).map_err(StorageError::Config);
}

/// Run store over one MongoDB collection. Every run becomes a new document.
/// The client is built on the first insert, so a bad uri only fails persistence.
pub struct MongoRunStore {
    settings: MongoSettings,
    collection: OnceCell<Collection<RunRecord>>,
}

impl MongoRunStore {
    pub fn new(settings: &MongoSettings) -> MongoRunStore {
        return MongoRunStore {
            settings: settings.clone(),
            collection: OnceCell::new(),
        };
    }

    fn target(&self) -> String {
        return format!("{}-{}", self.settings.database, self.settings.collection);
    }

    async fn collection(&self) -> Result<&Collection<RunRecord>, StorageError> {
        return self
            .collection
            .get_or_try_init(|| async {
                let client = create_mongo_client(&self.settings.uri).await?;
                Ok::<_, StorageError>(
                    client
                        .database(&self.settings.database)
                        .collection::<RunRecord>(&self.settings.collection),
                )
            })
            .await;
    }
}

#[async_trait]
impl RunStore for MongoRunStore {
    async fn insert_run(&self, run: &RunRecord) -> Result<(), StorageError> {
        let collection = self.collection().await.map_err(|err| {
            error!("unable to open db: {}; {}", self.target(), err);
            err
        })?;
        return match collection.insert_one(run, None).await {
            Ok(result) => {
                info!("successfully inserted run in db: {}; id {}", self.target(), result.inserted_id);
                Ok(())
            }
            Err(err) => {
                error!("unable to insert run in db: {}; {}", self.target(), err);
                Err(err.into())
            }
        };
    }
}
