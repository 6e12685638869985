use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::Deserialize;
use sigflow_algebra::Algebra;
use sigflow_core::{analyze, EdgeSpec, Error, NodeSpec};

use crate::roots::right_half_plane_roots;

#[derive(Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    nodes: Vec<NodeSpec>,
    #[serde(default)]
    edges: Vec<EdgeSpec>,
    #[serde(rename = "sourceNode", default = "default_source")]
    source_node: String,
    #[serde(rename = "destNode", default = "default_dest")]
    dest_node: String,
}

fn default_source() -> String {
    "S1".to_string()
}

fn default_dest() -> String {
    "S4".to_string()
}

#[derive(Deserialize)]
struct RootsRequest {
    #[serde(default)]
    coefficients: Vec<f64>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .route("/analyze", web::post().to(analyze_graph))
                .route("/health", web::get().to(health_check))
                .route("/calculate_rhs_roots", web::post().to(calculate_rhs_roots))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn analyze_graph(req: web::Json<AnalyzeRequest>) -> ActixResult<HttpResponse> {
    // Everything is request-scoped: the graph and all derived collections
    // live and die inside this call.
    match analyze(
        &Algebra,
        &req.nodes,
        &req.edges,
        &req.source_node,
        &req.dest_node,
    ) {
        Ok(report) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": report
        }))),
        Err(e @ Error::NodeNotFound(_)) => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": e.to_string()
        }))),
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}

async fn health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "Signal Flow Graph API is running"
    })))
}

async fn calculate_rhs_roots(req: web::Json<RootsRequest>) -> ActixResult<HttpResponse> {
    match right_half_plane_roots(&req.coefficients) {
        Ok(roots) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "rhs_roots": roots
        }))),
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}
