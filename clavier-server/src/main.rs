use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::{delete, get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{error, info, warn};
use serde::Deserialize;

use clavier_core::corpus::SAMPLE_CORPUS;
use clavier_core::io::{get_filename, list_files, normalize_folder, read_corpora};
use clavier_core::{ClavierError, KeyEvent, PredictorConfig, Session, TextPredictor};

/// HTTP front end of the next-word predictor.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// JSON file overriding the default predictor configuration
	#[arg(short, long)]
	config: Option<String>,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(short, long, default_value_t = 5000)]
	port: u16,

	/// Folder holding the `.txt` training corpora
	#[arg(short, long, default_value = "./data")]
	data: String,
}

#[derive(Deserialize)]
struct PredictQuery {
	sentence: Option<String>,
}

#[derive(Deserialize)]
struct MatchQuery {
	token: Option<String>,
}

#[derive(Deserialize)]
struct TrainQuery {
	names: Option<String>,
}

#[derive(Deserialize)]
struct KeyQuery {
	key: Option<String>,
}

#[derive(Deserialize)]
struct SelectQuery {
	index: Option<usize>,
}

/// State shared by every worker.
///
/// The session is recreated each time a new predictor is trained.
struct SharedData {
	data_folder: PathBuf,
	config: PredictorConfig,
	predictor: TextPredictor,
	session: Option<Session>,
}

impl SharedData {
	/// Replaces the predictor with one trained on `text` and starts a new session.
	fn retrain(&mut self, text: &str) -> Result<(), ClavierError> {
		let mut predictor = TextPredictor::new(self.config.clone())?;
		predictor.train(text);
		self.session = Some(Session::new(predictor.predictor()?));
		self.predictor = predictor;
		Ok(())
	}
}

/// Maps a core error to its HTTP response.
fn error_response(e: &ClavierError) -> HttpResponse {
	match e {
		ClavierError::UninitializedModel => HttpResponse::ServiceUnavailable().body(e.to_string()),
		ClavierError::SuggestionOutOfRange { .. } | ClavierError::InvalidConfig(_) => {
			HttpResponse::BadRequest().body(e.to_string())
		}
		ClavierError::Io(_) | ClavierError::Json(_) => {
			error!("{e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

fn lock(data: &web::Data<Mutex<SharedData>>) -> Result<MutexGuard<'_, SharedData>, HttpResponse> {
	data.lock().map_err(|_| {
		error!("shared data lock poisoned");
		HttpResponse::InternalServerError().body("Model lock failed")
	})
}

/// HTTP GET endpoint `/v1/predict`
///
/// Completes `sentence` with the most likely next words.
#[get("/v1/predict")]
async fn get_predict(data: web::Data<Mutex<SharedData>>, query: web::Query<PredictQuery>) -> impl Responder {
	let shared_data = match lock(&data) {
		Ok(d) => d,
		Err(response) => return response,
	};

	let sentence = query.sentence.as_deref().unwrap_or_default();
	match shared_data.predictor.predict_next(sentence) {
		Ok(outcome) => HttpResponse::Ok().json(outcome),
		Err(e) => error_response(&e),
	}
}

/// HTTP GET endpoint `/v1/match`
///
/// Lists the dictionary words the typed `token` may stand for.
#[get("/v1/match")]
async fn get_match(data: web::Data<Mutex<SharedData>>, query: web::Query<MatchQuery>) -> impl Responder {
	let shared_data = match lock(&data) {
		Ok(d) => d,
		Err(response) => return response,
	};

	let token = match &query.token {
		Some(t) if !t.trim().is_empty() => t.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty token"),
	};

	match shared_data.predictor.predictor() {
		Ok(predictor) => HttpResponse::Ok().json(predictor.match_word(token)),
		Err(e) => error_response(&e),
	}
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let folder = match lock(&data) {
		Ok(d) => d.data_folder.clone(),
		Err(response) => return response,
	};

	let names: std::io::Result<Vec<String>> = list_files(&folder, "txt")
		.and_then(|files| files.iter().map(get_filename).collect());
	match names {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(e) => {
			warn!("cannot list {}: {e}", folder.display());
			HttpResponse::InternalServerError().body("Failed to list corpora")
		}
	}
}

#[put("/v1/train")]
async fn put_train(data: web::Data<Mutex<SharedData>>, query: web::Query<TrainQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let mut shared_data = match lock(&data) {
		Ok(d) => d,
		Err(response) => return response,
	};

	let paths: Vec<PathBuf> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.map(|name| shared_data.data_folder.join(format!("{name}.txt")))
		.collect();

	let text = match read_corpora(&paths) {
		Ok(text) => text,
		Err(e) => return error_response(&ClavierError::from(e)),
	};

	match shared_data.retrain(&text) {
		Ok(()) => {
			info!("trained on {query_names}");
			HttpResponse::Ok().body("Predictor trained successfully")
		}
		Err(e) => error_response(&e),
	}
}

#[put("/v1/session/key")]
async fn put_key(data: web::Data<Mutex<SharedData>>, query: web::Query<KeyQuery>) -> impl Responder {
	let key = match query.key.as_deref().and_then(KeyEvent::from_key) {
		Some(k) => k,
		None => return HttpResponse::BadRequest().body("Key must be one character or 'backspace'"),
	};

	let mut shared_data = match lock(&data) {
		Ok(d) => d,
		Err(response) => return response,
	};

	match shared_data.session.as_mut() {
		Some(session) => HttpResponse::Ok().json(session.key_press(key)),
		None => error_response(&ClavierError::UninitializedModel),
	}
}

#[put("/v1/session/select")]
async fn put_select(data: web::Data<Mutex<SharedData>>, query: web::Query<SelectQuery>) -> impl Responder {
	let index = match query.index {
		Some(i) => i,
		None => return HttpResponse::BadRequest().body("Missing suggestion index"),
	};

	let mut shared_data = match lock(&data) {
		Ok(d) => d,
		Err(response) => return response,
	};

	let session = match shared_data.session.as_mut() {
		Some(s) => s,
		None => return error_response(&ClavierError::UninitializedModel),
	};

	match session.select_suggestion(index) {
		Ok(snapshot) => HttpResponse::Ok().json(snapshot),
		Err(e) => error_response(&e),
	}
}

#[delete("/v1/session")]
async fn delete_session(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match lock(&data) {
		Ok(d) => d,
		Err(response) => return response,
	};

	match shared_data.session.as_mut() {
		Some(session) => {
			session.reset();
			HttpResponse::Ok().json(session.snapshot())
		}
		None => error_response(&ClavierError::UninitializedModel),
	}
}

/// Main entry point for the server.
///
/// Trains a predictor on the built-in corpus, wraps it in a `Mutex` shared
/// by the workers and starts the Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000 unless `--host`/`--port` say otherwise.
/// - Other corpora can be trained from `<data>/*.txt` through `/v1/train`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => PredictorConfig::load(path).map_err(std::io::Error::other)?,
		None => PredictorConfig::default(),
	};

	let mut shared_data = SharedData {
		data_folder: normalize_folder(&args.data),
		config,
		predictor: TextPredictor::default(),
		session: None,
	};
	shared_data.retrain(SAMPLE_CORPUS).map_err(std::io::Error::other)?;
	let shared_data = web::Data::new(Mutex::new(shared_data));

	info!("listening on {}:{}", args.host, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(get_predict)
			.service(get_match)
			.service(get_corpora)
			.service(put_train)
			.service(put_key)
			.service(put_select)
			.service(delete_session)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
