#[macro_use]
extern crate rocket;

mod config;
mod error;
mod guards;
mod jwt;
mod models;
mod repository;
mod routes;
mod services;


use log::{error, info};
use rocket::fairing::{AdHoc, Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{Build, Request, Response, Rocket};
use rocket_db_pools::Database;

use config::AppConfig;
use guards::GuardRejection;
use models::response::ApiResponse;
use repository::{
    booking_repository::BookingRepository, category_repository::CategoryRepository,
    payment_repository::PaymentRepository, product_repository::ProductRepository,
    user_repository::UserRepository,
};
use services::stripe_service::StripeClient;

/// Pooled MongoDB client; the url comes from `databases.rewatch.url`.
#[derive(Database)]
#[database("rewatch")]
pub struct Db(rocket_db_pools::mongodb::Client);

pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, DELETE, OPTIONS",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        ));
    }
}

// preflight
#[options("/<_path..>")]
fn all_options(_path: std::path::PathBuf) -> Status {
    Status::Ok
}

fn rejection_message(req: &Request<'_>, fallback: &str) -> String {
    req.local_cache(|| GuardRejection(None))
        .0
        .clone()
        .unwrap_or_else(|| fallback.to_string())
}

#[catch(400)]
fn bad_request(req: &Request) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(rejection_message(req, "400: Bad Request")))
}

#[catch(401)]
fn unauthorized(req: &Request) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(rejection_message(req, "Unauthorized Access")))
}

#[catch(403)]
fn forbidden(req: &Request) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(rejection_message(req, "forbidden access")))
}

#[catch(404)]
fn not_found(req: &Request) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(format!("404: '{}' route not found", req.uri())))
}

#[catch(422)]
fn unprocessable(req: &Request) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(format!("422: malformed request to '{}'", req.uri())))
}

#[catch(500)]
fn internal_error(req: &Request) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(rejection_message(req, "500: Internal Server Error")))
}

/// One repository per collection, all sharing the pooled client.
fn repositories() -> AdHoc {
    AdHoc::try_on_ignite("Rewatch Repositories", |rocket| async move {
        let database = Db::fetch(&rocket)
            .zip(rocket.state::<AppConfig>())
            .map(|(db, config)| db.database(&config.db_name));
        let database = match database {
            Some(database) => database,
            None => {
                error!("database pool or config missing at ignition");
                return Err(rocket);
            }
        };
        info!("using database '{}'", database.name());

        Ok(rocket
            .manage(UserRepository::new(&database))
            .manage(CategoryRepository::new(&database))
            .manage(ProductRepository::new(&database))
            .manage(BookingRepository::new(&database))
            .manage(PaymentRepository::new(&database)))
    })
}

pub fn build_rocket(config: AppConfig) -> Rocket<Build> {
    let stripe = StripeClient::new(&config.stripe_api_base, &config.stripe_secret_key);

    rocket::custom(config.figment())
        .manage(config)
        .manage(stripe)
        .attach(Db::init())
        .attach(repositories())
        .attach(CORS)
        .mount("/", routes::all())
        .mount("/", routes![all_options])
        .register(
            "/",
            catchers![bad_request, unauthorized, forbidden, not_found, unprocessable, internal_error],
        )
}

#[rocket::main]
async fn main() {
    env_logger::init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Rewatch Server starting on port {}", config.port);

    if let Err(e) = build_rocket(config).launch().await {
        error!("Rewatch Server stopped: {}", e);
        std::process::exit(1);
    }
}
