use diesel::{r2d2::ConnectionManager, Connection, PgConnection, RunQueryDsl};
use once_cell::sync::Lazy;
use r2d2::Pool;
use reqwest::{redirect::Policy, Response};
use retail::{configuration::{DatabaseSettings, Settings}, db_interaction::{insert_user_into_database, UserRegistration}, startup::Application, telemetry::{get_subscriber, init_subscriber}, utils::{run_migrations, DbPool}};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "retail-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const TEST_USERNAME: &str = "clerk";
pub const TEST_PASSWORD: &str = "clerk-password";

#[derive(Deserialize, Debug)]
pub struct TokenPair{
    pub access: String,
    pub refresh: String
}

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub api_client: reqwest::Client,
    pub tokens: TokenPair
}

impl TestApp {
    fn create_db(settings: &DatabaseSettings) -> DbPool{
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");

        let pool = Pool::builder()
            .max_size(4)
            .build(ConnectionManager::<PgConnection>::new(settings.get_database_table_url()))
            .expect("Failed to build connection pool to test database");

        let mut conn = pool.get().expect("Failed to get connection to test database");
        run_migrations(&mut conn).expect("Failed to run migrations");

        pool
    }

    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn api_url(&self, path: &str) -> String{
        format!("{}/api{}", self.get_app_url(), path)
    }

    pub async fn spawn_app() -> TestApp{
        TestApp::spawn_app_with(|_| {}).await
    }

    pub async fn spawn_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get().expect("Failed to read configuration");
        customize(&mut settings);
        settings.application.port = 0;
        settings.database.name = Uuid::new_v4().to_string();

        let pool = TestApp::create_db(&settings.database);

        let application = Application::new(settings)
                            .await
                            .expect("Failed to build application");

        let host = application.host.clone();
        let port = application.port;
        tokio::task::spawn(application.server);

        insert_user_into_database(
            pool.get().expect("Failed to get connection to test database"),
            UserRegistration{
                username: TEST_USERNAME.to_string(),
                email: "clerk@example.com".to_string(),
                password: SecretString::from(TEST_PASSWORD.to_string()),
                is_staff: true,
                is_superuser: false
            }
        )
        .await
        .expect("Failed to seed test user");

        let api_client = reqwest::Client::builder()
                            .redirect(Policy::none())
                            .build()
                            .unwrap();

        let tokens = api_client.post(format!("http://{}:{}/api/token/", host, port))
            .json(&json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }))
            .send()
            .await
            .expect("Failed to send request to token endpoint")
            .json::<TokenPair>()
            .await
            .expect("Token endpoint did not return a token pair");

        TestApp{
            host,
            port,
            pool,
            api_client,
            tokens
        }
    }

    pub async fn get(&self, path: &str) -> Response{
        self.api_client.get(self.api_url(path))
            .bearer_auth(&self.tokens.access)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response{
        self.api_client.post(self.api_url(path))
            .bearer_auth(&self.tokens.access)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> Response{
        self.api_client.put(self.api_url(path))
            .bearer_auth(&self.tokens.access)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_json(&self, path: &str, body: &Value) -> Response{
        self.api_client.patch(self.api_url(path))
            .bearer_auth(&self.tokens.access)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> Response{
        self.api_client.delete(self.api_url(path))
            .bearer_auth(&self.tokens.access)
            .send()
            .await
            .expect("Failed to execute request")
    }

    // Seeding helpers, each returns the id of the created row
    pub async fn create_customer(&self, name: &str) -> i32{
        let response = self.post_json("/customers/", &json!({
            "name": name,
            "address": "12 Market Street",
            "phone": "555-0100"
        }))
        .await;
        assert_eq!(response.status().as_u16(), 201);

        response.json::<Value>().await.unwrap()["customer_id"].as_i64().unwrap() as i32
    }

    pub async fn create_supplier(&self, name: &str) -> i32{
        let response = self.post_json("/suppliers/", &json!({
            "name": name,
            "contact": "sales@acme.io"
        }))
        .await;
        assert_eq!(response.status().as_u16(), 201);

        response.json::<Value>().await.unwrap()["supplier_id"].as_i64().unwrap() as i32
    }

    pub async fn create_product(&self, name: &str, price: &str, stock: i32) -> i32{
        let response = self.post_json("/products/", &json!({
            "name": name,
            "price": price,
            "stock": stock
        }))
        .await;
        assert_eq!(response.status().as_u16(), 201);

        response.json::<Value>().await.unwrap()["product_id"].as_i64().unwrap() as i32
    }

    pub async fn create_order(&self, customer: i32, items: Value) -> Response{
        self.post_json("/orders/", &json!({
            "customer": customer,
            "items": items
        }))
        .await
    }

    pub async fn product_stock(&self, product_id: i32) -> i64{
        let response = self.get(&format!("/products/{}/", product_id)).await;
        assert_eq!(response.status().as_u16(), 200);

        response.json::<Value>().await.unwrap()["stock"].as_i64().unwrap()
    }
}
