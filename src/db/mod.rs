use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

pub const USERS: &str = "users";
pub const GENERATION_REQUESTS: &str = "generation_requests";
pub const CONTENTS: &str = "contents";

const MAX_POOL_SIZE: u32 = 10;
const SERVER_TIMEOUT: Duration = Duration::from_secs(5);

/// The application database. Clones share one connection pool.
#[derive(Clone)]
pub struct Database {
    inner: mongodb::Database,
}

impl Database {
    /// Connects and pings the application database, failing startup if it is unreachable.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;
        let inner = client.database(&config.mongo_db_name);

        inner.run_command(doc! { "ping": 1 }).await?;
        log::info!("Connected to MongoDB database '{}'", inner.name());

        Ok(Self { inner })
    }

    pub fn get_collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.inner.collection(name)
    }
}

async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.max_pool_size = Some(MAX_POOL_SIZE);
    options.connect_timeout = Some(SERVER_TIMEOUT);
    options.server_selection_timeout = Some(SERVER_TIMEOUT);
    Ok(options)
}
