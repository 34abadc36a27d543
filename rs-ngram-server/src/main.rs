use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use serde::{Deserialize, Serialize};

use rs_ngram_core::model::generation_input::parse_field;
use rs_ngram_core::{GenerationInput, LanguageModel, ModelError};

mod config;
mod page;

use config::Config;
use page::PageState;

/// Query parameters of `/v1/generate`.
#[derive(Deserialize)]
struct GenerateParams {
	n: Option<String>,
	prefix: Option<String>, // missing -> random seed
	length: Option<String>,
}

/// Query parameters of `/v1/prefixes` and `/v1/random_prefix`.
#[derive(Deserialize)]
struct OrderQuery {
	n: Option<String>,
}

/// Fields posted by the generator form.
#[derive(Deserialize)]
struct GenerateForm {
	n: Option<String>,
	prefix: Option<String>,
	length: Option<String>,
	reset: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct PrefixResponse {
	prefixes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
struct ErrorResponse {
	error: String,
}

struct SharedData {
	model: LanguageModel,
}

/// HTTP status matching a model error: caller mistakes are 400, the rest 500.
fn status_for(e: &ModelError) -> StatusCode {
	match e {
		ModelError::InvalidNumericInput { .. }
		| ModelError::InvalidPrefixLength { .. }
		| ModelError::InvalidOrder(_)
		| ModelError::LengthTooLarge { .. }
		| ModelError::NoSeedAvailable(_) => StatusCode::BAD_REQUEST,
		ModelError::Io(_) | ModelError::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
	}
}

fn page_title(data: &web::Data<Mutex<SharedData>>) -> String {
	match data.lock() {
		Ok(shared_data) => format!("Language Model Text Generator - {}", shared_data.model.corpus().name()),
		Err(_) => "Language Model Text Generator".to_owned(),
	}
}

/// HTTP GET endpoint `/`
///
/// Renders an empty generator form.
#[get("/")]
async fn index(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let state = PageState { title: page_title(&data), ..Default::default() };
	HttpResponse::Ok().content_type("text/html; charset=utf-8").body(page::render(&state))
}

/// HTTP POST endpoint `/`
///
/// Generates from the submitted form and renders the result or the error
/// next to the submitted values. `reset` clears the form. The form always
/// carries a prefix, so a blank one fails the word count instead of asking
/// for a random seed.
#[post("/")]
async fn submit(data: web::Data<Mutex<SharedData>>, form: web::Form<GenerateForm>) -> impl Responder {
	let title = page_title(&data);
	if form.reset.is_some() {
		let state = PageState { title, ..Default::default() };
		return HttpResponse::Ok().content_type("text/html; charset=utf-8").body(page::render(&state));
	}

	let mut state = PageState {
		title,
		n_value: form.n.clone().unwrap_or_default(),
		prefix_value: form.prefix.clone().unwrap_or_default(),
		length_value: form.length.clone().unwrap_or_default(),
		..Default::default()
	};

	let result = match GenerationInput::parse(&state.n_value, Some(state.prefix_value.as_str()), &state.length_value) {
		Ok(input) => match data.lock() {
			Ok(mut shared_data) => shared_data.model.generate(&input),
			Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
		},
		Err(e) => Err(e),
	};

	match result {
		Ok(sentence) => state.generated_sentence = sentence,
		Err(e @ ModelError::InvalidPrefixLength { .. }) => state.error_message = format!("Error: {}", e.user_message()),
		Err(e) => {
			if status_for(&e) == StatusCode::INTERNAL_SERVER_ERROR {
				error!("Generation failed: {e}");
			}
			state.error_message = e.user_message();
		}
	}

	HttpResponse::Ok().content_type("text/html; charset=utf-8").body(page::render(&state))
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns the generated sequence as plain text, or the validation message
/// with a 400 status. Leaving `prefix` out draws a random seed.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = match GenerationInput::parse(
		query.n.as_deref().unwrap_or_default(),
		query.prefix.as_deref(),
		query.length.as_deref().unwrap_or_default(),
	) {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e.user_message()),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.generate(&input) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => HttpResponse::build(status_for(&e)).body(e.user_message()),
	}
}

/// HTTP GET endpoints `/v1/prefixes` and `/get_prefixes`
///
/// Returns `{"prefixes": [...]}`, the ten most frequent `n-1` word prefixes.
/// `n` defaults to 2. A non-integer `n`, or one above `MAX_ORDER`, yields
/// `{"error": "..."}` with a 400 status.
async fn get_prefixes(data: web::Data<Mutex<SharedData>>, query: web::Query<OrderQuery>) -> impl Responder {
	let n = match parse_field("n", query.n.as_deref().unwrap_or("2")) {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().json(ErrorResponse { error: e.to_string() }),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => {
			return HttpResponse::InternalServerError().json(ErrorResponse { error: "Model lock failed".to_owned() });
		}
	};

	match shared_data.model.suggest_prefixes(n) {
		Ok(prefixes) => HttpResponse::Ok().json(PrefixResponse { prefixes }),
		Err(e) => HttpResponse::build(status_for(&e)).json(ErrorResponse { error: e.user_message() }),
	}
}

/// HTTP GET endpoint `/v1/random_prefix`
///
/// Returns a random `n-1` word window of the corpus as plain text.
#[get("/v1/random_prefix")]
async fn get_random_prefix(data: web::Data<Mutex<SharedData>>, query: web::Query<OrderQuery>) -> impl Responder {
	let n = match parse_field("n", query.n.as_deref().unwrap_or("2")) {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().body(e.user_message()),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.random_prefix(n) {
		Ok(prefix) => HttpResponse::Ok().body(prefix),
		Err(e) => HttpResponse::build(status_for(&e)).body(e.user_message()),
	}
}

/// Registers every route of the service.
fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(index)
		.service(submit)
		.service(get_generated)
		.service(get_random_prefix)
		.route("/v1/prefixes", web::get().to(get_prefixes))
		.route("/get_prefixes", web::get().to(get_prefixes));
}

/// Main entry point for the server.
///
/// Loads the corpus once, wraps the language model in a `Mutex` shared by
/// all workers, and starts the Actix-web HTTP server.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
	let config = Config::parse();

	let model = LanguageModel::new(&config.corpus)?;
	let shared_model = web::Data::new(Mutex::new(SharedData { model }));

	info!("Listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.configure(configure)
	})
	.bind((config.host.as_str(), config.port))?
	.run()
	.await?;

	Ok(())
}
