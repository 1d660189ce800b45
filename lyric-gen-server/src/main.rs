use std::path::PathBuf;
use std::sync::RwLock;

use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use lyric_gen_core::corpus::{list_corpora, CORPUS_EXTENSION};
use lyric_gen_core::model::generator::Generator;
use lyric_gen_core::model::prediction_input::{PredictionInput, StartSeed, DEFAULT_COUNT};
use lyric_gen_core::{ModelError, UNKNOWN_TOKEN};

/// HTTP front-end of the lyric generator.
#[derive(Parser, Debug)]
#[command(name = "lyric-gen-server")]
#[command(version, about)]
struct Args {
	/// Directory holding the lyric JSON files
	#[arg(long, env = "LYRIC_GEN_DATA_DIR", default_value = "./data")]
	data_dir: PathBuf,

	/// Address to bind
	#[arg(long, env = "LYRIC_GEN_BIND", default_value = "127.0.0.1")]
	bind: String,

	/// Port to listen on
	#[arg(long, env = "LYRIC_GEN_PORT", default_value_t = 5000)]
	port: u16,

	/// Corpora to load at startup (comma separated names)
	#[arg(long)]
	corpora: Option<String>,

	/// Order of the model built at startup
	#[arg(short = 'n', long, env = "LYRIC_GEN_ORDER", default_value_t = 3)]
	order: usize,
}

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<String>, // -> random (default), custom:<text> or none (order 1 only)
	count: Option<usize>,
	default: Option<String>
}

#[derive(Deserialize)]
struct PredictParams {
	context: Option<String>,
	default: Option<String>
}

#[derive(Deserialize)]
struct ProbabilityParams {
	word: String,
	context: Option<String>
}

#[derive(Serialize)]
struct ProbabilityResponse {
	word: String,
	context: String,
	probability: f64
}

#[derive(Deserialize)]
struct CorporaQuery {
	names: Option<String>,
	n: Option<usize>
}

struct ServerConfig {
	data_dir: PathBuf
}

/// The model currently served. Replaced as a whole, never modified.
#[derive(Default)]
struct SharedData {
	generator: Option<Generator>
}

impl GenerateParams {
	/// Determines the starting seed strategy for sequence generation.
	fn start_seed(&self) -> Result<StartSeed, String> {
		match &self.seed {
			None => Ok(StartSeed::Random),
			Some(s) if s.to_lowercase() == "none" => Ok(StartSeed::False),
			Some(s) if s.to_lowercase() == "random" => Ok(StartSeed::Random),
			Some(s) if s.to_lowercase().starts_with("custom:") => {
				let value = &s["custom:".len()..];
				if value.trim().is_empty() {
					Err("Custom seed cannot be empty".into())
				} else {
					Ok(StartSeed::Custom(value.to_owned()))
				}
			}
			Some(_) => Err("Seed must start with 'custom:' or be 'random' or 'none'".into()),
		}
	}

	fn prediction_input(&self) -> Result<PredictionInput, String> {
		let mut input = PredictionInput::default();
		input.start_seed = self.start_seed()?;
		input.count = self.count.unwrap_or(DEFAULT_COUNT);
		if let Some(default) = &self.default {
			input.set_default_token(default).map_err(|e| e.to_string())?;
		}
		Ok(input)
	}
}

/// Maps a model error to an HTTP response.
fn error_response(e: &ModelError) -> HttpResponse {
	match e {
		ModelError::InvalidArgument(_) => HttpResponse::BadRequest().body(e.to_string()),
		ModelError::EmptyModel => HttpResponse::Conflict().body(e.to_string()),
		ModelError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => HttpResponse::NotFound().body(e.to_string()),
		_ => {
			error!("{e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

fn no_model() -> HttpResponse {
	HttpResponse::ServiceUnavailable().body("No model loaded, use /v1/load_corpora first")
}

/// Corpus names are file stems inside the data directory, nothing else.
fn is_valid_name(name: &str) -> bool {
	!name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// HTTP GET endpoint `/v1/generate`
///
/// Extends the requested seed with greedy predictions.
/// Returns the space-joined words (seed included) as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = match query.prediction_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let Some(generator) = &shared_data.generator else {
		return no_model();
	};

	match generator.generate_text(&input) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => error_response(&e),
	}
}

#[get("/v1/predict")]
async fn get_predicted(data: web::Data<RwLock<SharedData>>, query: web::Query<PredictParams>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let Some(generator) = &shared_data.generator else {
		return no_model();
	};

	let context = query.context.as_deref().unwrap_or("");
	let default = query.default.as_deref().unwrap_or(UNKNOWN_TOKEN);
	HttpResponse::Ok().body(generator.predict(context, default))
}

#[get("/v1/probability")]
async fn get_probability(data: web::Data<RwLock<SharedData>>, query: web::Query<ProbabilityParams>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let Some(generator) = &shared_data.generator else {
		return no_model();
	};

	let context = query.context.clone().unwrap_or_default();
	let probability = generator.probability(&query.word, &context);
	HttpResponse::Ok().json(ProbabilityResponse { word: query.word.clone(), context, probability })
}

#[get("/v1/corpora")]
async fn get_corpora(config: web::Data<ServerConfig>) -> impl Responder {
	match list_corpora(&config.data_dir) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(e) => {
			warn!("cannot list {}: {e}", config.data_dir.display());
			HttpResponse::InternalServerError().body("Failed to list corpora")
		}
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.generator {
		Some(generator) => HttpResponse::Ok().body(generator.corpus_names().join("\n")),
		None => HttpResponse::Ok().body(""),
	}
}

/// HTTP PUT endpoint `/v1/load_corpora`
///
/// Builds a new model from the named corpora and swaps it in. The model
/// is built before taking the write lock, so requests keep being served
/// by the previous model meanwhile.
#[put("/v1/load_corpora")]
async fn put_corpora(
	data: web::Data<RwLock<SharedData>>,
	config: web::Data<ServerConfig>,
	query: web::Query<CorporaQuery>,
) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};
	let names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();
	if let Some(name) = names.iter().find(|name| !is_valid_name(name)) {
		return HttpResponse::BadRequest().body(format!("Invalid corpus name: {name}"));
	}

	let n = query.n.unwrap_or(3);
	let paths: Vec<PathBuf> = names
		.iter()
		.map(|name| config.data_dir.join(format!("{name}.{CORPUS_EXTENSION}")))
		.collect();

	let generator = match web::block(move || Generator::from_lyrics_files(&paths, n)).await {
		Ok(Ok(generator)) => generator,
		Ok(Err(e)) => return error_response(&e),
		Err(_) => return HttpResponse::InternalServerError().body("Model build was interrupted"),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	info!("serving {n}-gram model built from {}", generator.corpus_names().join(", "));
	shared_data.generator = Some(generator);

	HttpResponse::Ok().body("Corpora loaded successfully")
}

/// Registers every endpoint.
fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_predicted)
		.service(get_probability)
		.service(get_corpora)
		.service(get_loaded_corpora)
		.service(put_corpora);
}

/// Main entry point for the server.
///
/// Optionally builds a model from the corpora named on the command line,
/// wraps it in a `RwLock` (many readers, a writer only to swap models)
/// and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let args = Args::parse();

	let mut shared_data = SharedData::default();
	if let Some(corpora) = &args.corpora {
		let paths: Vec<PathBuf> = corpora
			.split(',')
			.map(|s| s.trim())
			.filter(|s| !s.is_empty())
			.map(|name| args.data_dir.join(format!("{name}.{CORPUS_EXTENSION}")))
			.collect();
		match Generator::from_lyrics_files(&paths, args.order) {
			Ok(generator) => shared_data.generator = Some(generator),
			Err(e) => error!("startup corpora not loaded: {e}"),
		}
	}

	let shared_model = web::Data::new(RwLock::new(shared_data));
	let config = web::Data::new(ServerConfig { data_dir: args.data_dir.clone() });

	info!("listening on {}:{}", args.bind, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.app_data(shared_model.clone())
			.app_data(config.clone())
			.configure(configure)
	})
		.bind((args.bind.as_str(), args.port))?
		.run()
		.await
}
