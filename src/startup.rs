use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{auth::Tokenizer, configuration::{OrderSettings, Settings}, error::{ApiError, FieldErrors}, routes::*, utils::{get_connection_pool, DbPool}};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    pub async fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = get_connection_pool(&settings.database);
        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))?;
        let port = listener.local_addr()?.port();

        let server = run(
            listener,
            pool,
            Tokenizer::new(&settings.jwt),
            settings.orders
        )?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error>{
        self.server.await
    }
}

fn json_config() -> web::JsonConfig{
    web::JsonConfig::default()
        .error_handler(|err, _req| {
            ApiError::Validation(FieldErrors::single("non_field_errors", err.to_string())).into()
        })
}

fn query_config() -> web::QueryConfig{
    web::QueryConfig::default()
        .error_handler(|err, _req| {
            ApiError::Validation(FieldErrors::single("non_field_errors", err.to_string())).into()
        })
}

// Non-numeric ids never match a row
fn path_config() -> web::PathConfig{
    web::PathConfig::default()
        .error_handler(|_err, _req| ApiError::NotFound.into())
}

pub fn api_routes(cfg: &mut web::ServiceConfig){
    cfg
        .route("/token/", web::post().to(login))
        .route("/auth/login/", web::post().to(login))
        .route("/token/refresh/", web::post().to(refresh_token))
        .route("/users/me/", web::get().to(current_user))
        .route("/dashboard/", web::get().to(dashboard_stats))
        .service(
            web::resource("/customers/")
                .route(web::get().to(list_customers))
                .route(web::post().to(create_customer))
        )
        .service(
            web::resource("/customers/{id}/")
                .route(web::get().to(retrieve_customer))
                .route(web::put().to(replace_customer))
                .route(web::patch().to(patch_customer))
                .route(web::delete().to(destroy_customer))
        )
        .service(
            web::resource("/suppliers/")
                .route(web::get().to(list_suppliers))
                .route(web::post().to(create_supplier))
        )
        .service(
            web::resource("/suppliers/{id}/")
                .route(web::get().to(retrieve_supplier))
                .route(web::put().to(replace_supplier))
                .route(web::patch().to(patch_supplier))
                .route(web::delete().to(destroy_supplier))
        )
        .service(
            web::resource("/products/")
                .route(web::get().to(list_products))
                .route(web::post().to(create_product))
        )
        .service(
            web::resource("/products/{id}/")
                .route(web::get().to(retrieve_product))
                .route(web::put().to(replace_product))
                .route(web::patch().to(patch_product))
                .route(web::delete().to(destroy_product))
        )
        .service(
            web::resource("/orders/")
                .route(web::get().to(get_orders))
                .route(web::post().to(post_order))
        )
        .service(
            web::resource("/orders/{id}/")
                .route(web::get().to(get_order))
                .route(web::delete().to(delete_order))
        )
        .service(
            web::resource("/payments/")
                .route(web::get().to(list_payments))
                .route(web::post().to(create_payment))
        )
        .service(
            web::resource("/payments/{id}/")
                .route(web::get().to(retrieve_payment))
                .route(web::put().to(replace_payment))
                .route(web::patch().to(patch_payment))
                .route(web::delete().to(destroy_payment))
        )
        .service(
            web::resource("/product-suppliers/")
                .route(web::get().to(list_product_suppliers))
                .route(web::post().to(create_product_supplier))
        )
        .service(
            web::resource("/product-suppliers/{id}/")
                .route(web::get().to(retrieve_product_supplier))
                .route(web::put().to(replace_product_supplier))
                .route(web::patch().to(patch_product_supplier))
                .route(web::delete().to(destroy_product_supplier))
        );
}

pub fn run(
    listener: TcpListener,
    pool: DbPool,
    tokenizer: Tokenizer,
    order_settings: OrderSettings
) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let tokenizer = web::Data::new(tokenizer);
    let order_settings = web::Data::new(order_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .app_data(pool.clone())
            .app_data(tokenizer.clone())
            .app_data(order_settings.clone())
            .route("/health", web::get().to(health_check))
            .service(web::scope("/api").configure(api_routes))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
