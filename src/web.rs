use std::collections::BTreeMap;
use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use actix_files::Files;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::catalog::{course_catalog, filter_records, parse_course_list, search_courses, Course};
use crate::grid::color::{ColorAssigner, HashColorAssigner};
use crate::grid::{build_grid_with, CollisionPolicy, Color, ColorPolicy, Grid, GridTable, MeetingRecord};
use crate::parser::DateSheet;

/// Shared, read-only state: the date sheet is loaded once at startup
pub struct AppState {
    pub sheet: DateSheet,
    pub catalog: Vec<Course>,
}

impl AppState {
    pub fn new(sheet: DateSheet) -> Self {
        let catalog = course_catalog(&sheet.records);
        AppState { sheet, catalog }
    }
}

#[derive(Deserialize)]
pub struct CourseQuery {
    #[serde(default)]
    query: String,
}

#[derive(Deserialize)]
pub struct SelectionQuery {
    #[serde(default)]
    courses: String,
    colors: Option<String>,
    collisions: Option<String>,
    seed: Option<u64>,
}

#[derive(Serialize)]
pub struct DatesheetResponse<'a> {
    data_sheet: Vec<MeetingRecord>,
    time_slots: &'a [String],
}

#[derive(Serialize)]
pub struct GridResponse {
    grid: Grid,
    table: GridTable,
    columns: Vec<Vec<String>>,
    fill_columns: Vec<Vec<Color>>,
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({"error": message}))
}

/// Parses an optional policy name, falling back to the default when absent
fn parse_policy<T: ValueEnum + Default>(value: Option<&str>, what: &str) -> Result<T, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(T::default()),
        Some(v) => T::from_str(v, true).map_err(|_| format!("Invalid {} policy: {}", what, v)),
    }
}

// Course suggestions endpoint
async fn get_courses(
    query: web::Query<CourseQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let matches: Vec<&Course> = search_courses(&state.catalog, &query.query);
    debug!(query = %query.query, matches = matches.len(), "Course search");
    Ok(HttpResponse::Ok().json(matches))
}

// Flat date sheet endpoint
async fn get_datesheet(
    query: web::Query<SelectionQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let selection = parse_course_list(&query.courses);
    let records = filter_records(&state.sheet.records, &selection);
    Ok(HttpResponse::Ok().json(DatesheetResponse {
        data_sheet: records,
        time_slots: &state.sheet.time_slots,
    }))
}

// Grid endpoint
async fn get_grid(
    query: web::Query<SelectionQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let colors: ColorPolicy = match parse_policy(query.colors.as_deref(), "color") {
        Ok(policy) => policy,
        Err(e) => return Ok(bad_request(e)),
    };
    let collisions: CollisionPolicy = match parse_policy(query.collisions.as_deref(), "collision") {
        Ok(policy) => policy,
        Err(e) => return Ok(bad_request(e)),
    };

    let selection = parse_course_list(&query.courses);
    let records = filter_records(&state.sheet.records, &selection);
    let mut assigner = colors.assigner(query.seed);
    let grid = build_grid_with(&records, &state.sheet.time_slots, collisions, assigner.as_mut());
    let table = GridTable::from_grid(&grid);

    Ok(HttpResponse::Ok().json(GridResponse {
        columns: table.columns(),
        fill_columns: table.fill_columns(),
        grid,
        table,
    }))
}

// Tag colors for selected course keys; always hash-derived so tags match the default grid
async fn post_colors(keys: web::Json<Vec<String>>) -> Result<HttpResponse> {
    let mut assigner = HashColorAssigner;
    let colors: BTreeMap<&str, Color> = keys
        .iter()
        .map(|key| (key.as_str(), assigner.color_for(key)))
        .collect();
    Ok(HttpResponse::Ok().json(colors))
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers the JSON API routes
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/courses", web::get().to(get_courses))
        .route("/api/datesheet", web::get().to(get_datesheet))
        .route("/api/grid", web::get().to(get_grid))
        .route("/api/colors", web::post().to(post_colors));
}

pub async fn start_server(port: u16, sheet: DateSheet) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(sheet));
    info!(
        courses = app_state.catalog.len(),
        port,
        "Starting web server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .route("/", web::get().to(index))
            .configure(api_routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
