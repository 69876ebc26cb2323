pub mod catalog;
pub mod mock;
pub mod routes;
pub mod telemetry;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use payloads::requests::CreateWine;
use payloads::{APIClient, AdminCredentials, WineId, WineStatus, WineryId};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use std::net::TcpListener;
use std::sync::Mutex;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub use catalog::Catalog;
pub use routes::SharedCatalog;

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    pub admin_username: String,
    pub admin_password: SecretString,
    /// List of allowed CORS origins. Use "*" to allow any origin.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            ip: var("IP_ADDRESS").unwrap_or_else(|_| "127.0.0.1".into()),
            port: var("PORT")
                .unwrap_or_else(|_| "8000".into())
                .parse()
                .context("PORT must be a port number")?,
            admin_username: var("ADMIN_USERNAME")
                .context("ADMIN_USERNAME is not set")?,
            admin_password: var("ADMIN_PASSWORD")
                .context("ADMIN_PASSWORD is not set")?
                .into(),
            allowed_origins,
        })
    }

    pub fn for_tests() -> Self {
        Config {
            ip: "127.0.0.1".into(),
            port: 0,
            admin_username: "admin".into(),
            admin_password: "admin123".to_string().into(),
            allowed_origins: vec!["*".to_string()],
        }
    }

    pub fn admin_credentials(&self) -> AdminCredentials {
        AdminCredentials::new(
            self.admin_username.clone(),
            self.admin_password.expose_secret(),
        )
    }
}

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(
    config: &mut Config,
    catalog: SharedCatalog,
) -> std::io::Result<Server> {
    let admin = web::Data::new(config.admin_credentials());
    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let cors = if allowed_origins.iter().any(|origin| origin == "*") {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
        } else {
            let mut cors =
                Cors::default().allow_any_method().allow_any_header();
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .wrap(cors)
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .service(routes::health_check)
            .service(routes::api_services())
            .app_data(catalog.clone())
            .app_data(admin.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct TestApp {
    pub port: u16,
    /// Anonymous client, as used by the public catalog.
    pub client: APIClient,
    /// Client carrying the admin credentials.
    pub admin: APIClient,
    pub catalog: SharedCatalog,
}

impl TestApp {
    /// Create a wine through the admin API.
    pub async fn create_wine(
        &self,
        details: &CreateWine,
    ) -> anyhow::Result<WineId> {
        Ok(self.admin.create_wine(details).await?.id)
    }

    /// Create a wine with default details for `name` at the first winery.
    pub async fn create_named_wine(
        &self,
        name: &str,
        status: WineStatus,
    ) -> anyhow::Result<WineId> {
        self.create_wine(&wine_details(WineryId(1), name, status))
            .await
    }

    /// Client with an arbitrary credential pair.
    pub fn client_with(&self, username: &str, password: &str) -> APIClient {
        APIClient::new(self.client.address.clone())
            .with_credentials(AdminCredentials::new(username, password))
    }
}

/// Spawn the mock API on an OS-assigned port with the seed wineries and no
/// wines.
pub async fn spawn_app() -> anyhow::Result<TestApp> {
    spawn_app_with(Config::for_tests()).await
}

pub async fn spawn_app_with(mut config: Config) -> anyhow::Result<TestApp> {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let catalog = web::Data::new(Mutex::new(Catalog::new(mock::wineries())));
    let server = build(&mut config, catalog.clone())?;
    tokio::spawn(server);

    let address = format!("http://{}:{}", config.ip, config.port);
    Ok(TestApp {
        port: config.port,
        client: APIClient::new(address.clone()),
        admin: APIClient::new(address)
            .with_credentials(config.admin_credentials()),
        catalog,
    })
}

/// Minimal create body; tests fill in the fields they care about.
pub fn wine_details(
    winery_id: WineryId,
    name: &str,
    status: WineStatus,
) -> CreateWine {
    CreateWine {
        winery_id,
        name: name.to_string(),
        variety: None,
        vintage: None,
        price: None,
        description: None,
        product_url: None,
        image_url: None,
        alcohol_content: None,
        bottle_size: None,
        is_available: true,
        status,
    }
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
