//! Request layer.
//!
//! This module exposes the search pipeline to the web front end. Requests are
//! typed [`ApiRequest`] values; every request produces an [`ApiResponse`]
//! envelope carrying an HTTP-style status code and a JSON body. Body field
//! names are the ones the front end reads, so they stay in Latvian.
//!
//! The transport lives in [`stdio`]: one JSON request per input line, one
//! envelope per output line.

pub mod stdio;

use std::sync::Arc;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::DEFAULT_AI_MODEL;
use crate::degree::DegreeTable;
use crate::models::{Teacher, TeacherId};
use crate::query::{QueryError, SearchEngine};
use crate::stats::{department_counts, DegreeBreakdown, TOP_DEPARTMENTS};

pub use stdio::{serve, serve_stdio};

/// Message shown to the user when a search arrives without a query.
pub const EMPTY_QUERY_MESSAGE: &str = "Lūdzu, ievadiet meklēšanas vaicājumu";

/// Query used by `test-ai` when none is given.
pub const DEFAULT_TEST_QUERY: &str = "atrod man visus maģistrus";

/// Number of names reported by `test-ai`.
const TEST_AI_NAME_COUNT: usize = 5;

const PROJECT_NAME: &str = "LBTU Pasniedzēju Meklēšanas AI Asistents";
const SYSTEM_NAME: &str = "LBTU AI Asistents";
const AI_PROVIDER: &str = "OpenRouter";
const LOCAL_SYSTEM_LABEL: &str = "Viedā meklēšana (bez AI)";

/// Errors that can occur while serving requests.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Search execution failed
    #[error("Search failed: {0}")]
    SearchError(String),

    /// Reading or writing the transport failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Other unexpected errors
    #[error("Server error: {0}")]
    Other(String),
}

impl ServerError {
    /// HTTP-style status code for the envelope.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::InvalidRequest(_) => 400,
            _ => 500,
        }
    }

    /// Client-facing error body. Internal details are not exposed.
    pub fn body(&self) -> Value {
        match self {
            ServerError::InvalidRequest(message) => serde_json::json!({
                "kļūda": "Nepilns pieprasījums",
                "ziņojums": message,
            }),
            _ => serde_json::json!({
                "kļūda": "Servera kļūda",
                "ziņojums": "Radās tehniskas problēmas, mēģiniet vēlreiz",
            }),
        }
    }
}

impl From<QueryError> for ServerError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidQuery(_) => ServerError::InvalidRequest(EMPTY_QUERY_MESSAGE.to_string()),
            QueryError::Other(message) => ServerError::SearchError(message),
        }
    }
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// A routed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "kebab-case")]
pub enum ApiRequest {
    /// Project description
    Index,

    /// Run the search pipeline
    Search {
        #[serde(default)]
        query: Option<String>,
    },

    /// Every record, unfiltered
    Teachers,

    /// Degree and department statistics
    Stats,

    /// Liveness and a short summary
    Health,

    /// Run the pipeline for a diagnostic query
    TestAi {
        #[serde(default)]
        query: Option<String>,
    },
}

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok<T: Serialize>(body: &T) -> ServerResult<Self> {
        let body = serde_json::to_value(body).map_err(|e| ServerError::Other(e.to_string()))?;
        Ok(Self { status: 200, body })
    }

    fn from_error(err: &ServerError) -> Self {
        Self {
            status: err.status_code(),
            body: err.body(),
        }
    }
}

/// A record as the front end sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherDto {
    pub id: TeacherId,
    #[serde(rename = "vārds")]
    pub name: String,
    #[serde(rename = "amats")]
    pub position: String,
    #[serde(rename = "nodaļa")]
    pub department: String,
    #[serde(rename = "grāds")]
    pub degree: String,
    #[serde(rename = "kursi")]
    pub courses: Vec<String>,
    #[serde(rename = "epasts", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "pētniecība", skip_serializing_if = "Option::is_none")]
    pub research: Option<String>,
    #[serde(rename = "profilaLinks", skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

impl From<Teacher> for TeacherDto {
    fn from(teacher: Teacher) -> Self {
        Self {
            id: teacher.id,
            name: teacher.name,
            position: teacher.position,
            department: teacher.department,
            degree: teacher.degree,
            courses: teacher.courses,
            email: teacher.email,
            research: teacher.research,
            profile_url: teacher.profile_url,
        }
    }
}

impl TeacherDto {
    /// Contact fields as empty strings instead of absent keys, the shape the
    /// directory listing uses.
    pub fn with_blank_contacts(mut self) -> Self {
        for field in [&mut self.email, &mut self.research, &mut self.profile_url] {
            if field.is_none() {
                *field = Some(String::new());
            }
        }
        self
    }
}

/// Response of the `search` route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "oriģinālaisVaicājums")]
    pub query: String,
    #[serde(rename = "apstrādātieAtslēgvārdi")]
    pub keywords: String,
    #[serde(rename = "aiLietots")]
    pub ai_used: bool,
    #[serde(rename = "aiPiegādātājs")]
    pub ai_provider: String,
    #[serde(rename = "atrastieSkaits")]
    pub count: usize,
    #[serde(rename = "rezultāti")]
    pub results: Vec<TeacherDto>,
    #[serde(rename = "laiks")]
    pub timestamp: String,
}

/// Response of the `teachers` route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeachersResponse {
    #[serde(rename = "kopējaisSkaits")]
    pub total: usize,
    #[serde(rename = "pasniedzēji")]
    pub teachers: Vec<TeacherDto>,
    #[serde(rename = "laiks")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeSplit {
    #[serde(rename = "Maģistri (Mg.)")]
    pub masters: usize,
    #[serde(rename = "Doktori (Dr./PhD)")]
    pub doctors: usize,
    #[serde(rename = "Bakalauri (Bc.)")]
    pub bachelors: usize,
    #[serde(rename = "Citi/bez grāda")]
    pub other: usize,
}

/// Response of the `stats` route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "kopāPasniedzēju")]
    pub total: usize,
    #[serde(rename = "grāduSadalījums")]
    pub degrees: DegreeSplit,
    /// `[department, count]` pairs, largest first
    #[serde(rename = "nodaļas")]
    pub departments: Vec<(String, usize)>,
    #[serde(rename = "arAI")]
    pub ai_configured: bool,
    #[serde(rename = "apraksts")]
    pub description: String,
    #[serde(rename = "atjaunots")]
    pub updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCounts {
    #[serde(rename = "maģistri")]
    pub masters: usize,
    #[serde(rename = "doktori")]
    pub doctors: usize,
    #[serde(rename = "bakalauri")]
    pub bachelors: usize,
    #[serde(rename = "citi")]
    pub other: usize,
}

/// Response of the `health` route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(rename = "statuss")]
    pub status: String,
    #[serde(rename = "sistēma")]
    pub system: String,
    #[serde(rename = "versija")]
    pub version: String,
    #[serde(rename = "laiks")]
    pub timestamp: String,
    #[serde(rename = "pasniedzējuSkaits")]
    pub teacher_count: usize,
    #[serde(rename = "statistika")]
    pub counts: HealthCounts,
    #[serde(rename = "aiKonfigurēts")]
    pub ai_configured: bool,
    #[serde(rename = "darbībasLaiks")]
    pub uptime: String,
}

/// Response of the `test-ai` route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestAiResponse {
    #[serde(rename = "statuss")]
    pub status: String,
    #[serde(rename = "testaVaicājums")]
    pub query: String,
    #[serde(rename = "iegūtieAtslēgvārdi")]
    pub keywords: String,
    #[serde(rename = "atrastiePasniedzēji")]
    pub count: usize,
    #[serde(rename = "pasniedzējuVārdi")]
    pub names: Vec<String>,
    #[serde(rename = "aiSistēma")]
    pub ai_system: String,
    #[serde(rename = "aiPieejams")]
    pub ai_available: bool,
    #[serde(rename = "laiks")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteList {
    #[serde(rename = "meklēt")]
    pub search: String,
    #[serde(rename = "visiPasniedzēji")]
    pub teachers: String,
    #[serde(rename = "statistika")]
    pub stats: String,
    #[serde(rename = "veselība")]
    pub health: String,
    #[serde(rename = "testetAI")]
    pub test_ai: String,
}

/// Response of the `index` route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    #[serde(rename = "projekts")]
    pub project: String,
    #[serde(rename = "versija")]
    pub version: String,
    #[serde(rename = "statuss")]
    pub status: String,
    #[serde(rename = "valoda")]
    pub language: String,
    #[serde(rename = "aiPiegādātājs")]
    pub ai_provider: String,
    #[serde(rename = "aiModelis")]
    pub ai_model: String,
    #[serde(rename = "aiPieejams")]
    pub ai_available: bool,
    #[serde(rename = "maršruti")]
    pub routes: RouteList,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Dispatches requests to a search engine.
pub struct ApiServer<E: SearchEngine> {
    engine: E,
    table: Arc<DegreeTable>,
    ai_model: String,
    started: Instant,
}

impl<E: SearchEngine> ApiServer<E> {
    /// Create a server; `table` is the degree table the engine uses.
    pub fn new(engine: E, table: Arc<DegreeTable>) -> Self {
        Self {
            engine,
            table,
            ai_model: DEFAULT_AI_MODEL.to_string(),
            started: Instant::now(),
        }
    }

    /// Model name reported by `index` and `test-ai`.
    pub fn with_ai_model(mut self, model: impl Into<String>) -> Self {
        self.ai_model = model.into();
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Parse and handle one raw JSON request.
    pub async fn handle_line(&self, line: &str) -> ApiResponse {
        match serde_json::from_str::<ApiRequest>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!(error = %e, "Unparseable request");
                ApiResponse::from_error(&ServerError::InvalidRequest(format!(
                    "Nederīgs pieprasījums: {}",
                    e
                )))
            }
        }
    }

    /// Handle one request. Failures become error envelopes.
    pub async fn handle(&self, request: ApiRequest) -> ApiResponse {
        let result = match request {
            ApiRequest::Index => self.handle_index(),
            ApiRequest::Search { query } => self.handle_search(query).await,
            ApiRequest::Teachers => self.handle_teachers().await,
            ApiRequest::Stats => self.handle_stats().await,
            ApiRequest::Health => self.handle_health().await,
            ApiRequest::TestAi { query } => self.handle_test_ai(query).await,
        };

        result.unwrap_or_else(|err| {
            if err.status_code() >= 500 {
                error!(error = %err, "Request failed");
            }
            ApiResponse::from_error(&err)
        })
    }

    fn handle_index(&self) -> ServerResult<ApiResponse> {
        ApiResponse::ok(&IndexResponse {
            project: PROJECT_NAME.to_string(),
            version: crate::VERSION.to_string(),
            status: "aktīvs".to_string(),
            language: "latviešu".to_string(),
            ai_provider: AI_PROVIDER.to_string(),
            ai_model: self.ai_model.clone(),
            ai_available: self.engine.ai_configured(),
            routes: RouteList {
                search: "search".to_string(),
                teachers: "teachers".to_string(),
                stats: "stats".to_string(),
                health: "health".to_string(),
                test_ai: "test-ai".to_string(),
            },
        })
    }

    async fn handle_search(&self, query: Option<String>) -> ServerResult<ApiResponse> {
        let query = query
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| ServerError::InvalidRequest(EMPTY_QUERY_MESSAGE.to_string()))?;

        info!(query = %query, "Search request");
        let outcome = self.engine.search(&query).await?;

        let results: Vec<TeacherDto> = outcome.results.into_iter().map(TeacherDto::from).collect();
        ApiResponse::ok(&SearchResponse {
            query,
            keywords: outcome.keywords_used,
            ai_used: outcome.ai_was_used,
            ai_provider: AI_PROVIDER.to_string(),
            count: results.len(),
            results,
            timestamp: timestamp(),
        })
    }

    async fn handle_teachers(&self) -> ServerResult<ApiResponse> {
        let outcome = self.engine.list_all().await;
        info!(count = outcome.results.len(), "Listing all teachers");

        let teachers: Vec<TeacherDto> = outcome
            .results
            .into_iter()
            .map(|teacher| TeacherDto::from(teacher).with_blank_contacts())
            .collect();
        ApiResponse::ok(&TeachersResponse {
            total: teachers.len(),
            teachers,
            timestamp: timestamp(),
        })
    }

    async fn handle_stats(&self) -> ServerResult<ApiResponse> {
        let teachers = self.engine.list_all().await.results;
        let breakdown = DegreeBreakdown::compute(&teachers, &self.table);
        let departments = department_counts(&teachers, TOP_DEPARTMENTS)
            .into_iter()
            .map(|d| (d.department, d.count))
            .collect();

        ApiResponse::ok(&StatsResponse {
            total: breakdown.total,
            degrees: DegreeSplit {
                masters: breakdown.masters,
                doctors: breakdown.doctors,
                bachelors: breakdown.bachelors,
                other: breakdown.other,
            },
            departments,
            ai_configured: self.engine.ai_configured(),
            description: "LBTU pasniedzēju datu bāzes statistika".to_string(),
            updated: timestamp(),
        })
    }

    async fn handle_health(&self) -> ServerResult<ApiResponse> {
        let teachers = self.engine.list_all().await.results;
        let breakdown = DegreeBreakdown::compute(&teachers, &self.table);
        let minutes = self.started.elapsed().as_secs() / 60;

        ApiResponse::ok(&HealthResponse {
            status: "Vesels".to_string(),
            system: SYSTEM_NAME.to_string(),
            version: crate::VERSION.to_string(),
            timestamp: timestamp(),
            teacher_count: breakdown.total,
            counts: HealthCounts {
                masters: breakdown.masters,
                doctors: breakdown.doctors,
                bachelors: breakdown.bachelors,
                other: breakdown.other,
            },
            ai_configured: self.engine.ai_configured(),
            uptime: format!("{} minūtes", minutes),
        })
    }

    async fn handle_test_ai(&self, query: Option<String>) -> ServerResult<ApiResponse> {
        let query = query
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TEST_QUERY.to_string());

        info!(query = %query, "Testing AI normalization");
        let outcome = self.engine.search(&query).await?;
        let ai_available = self.engine.ai_configured();
        let ai_system = if ai_available {
            format!("{} + {}", AI_PROVIDER, self.ai_model)
        } else {
            LOCAL_SYSTEM_LABEL.to_string()
        };

        ApiResponse::ok(&TestAiResponse {
            status: "veiksmīgs".to_string(),
            query,
            keywords: outcome.keywords_used,
            count: outcome.results.len(),
            names: outcome
                .results
                .into_iter()
                .take(TEST_AI_NAME_COUNT)
                .map(|t| t.name)
                .collect(),
            ai_system,
            ai_available,
            timestamp: timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::openrouter::OpenRouterClient;
    use crate::ai::KeywordNormalizer;
    use crate::keywords::KeywordExtractor;
    use crate::models::{KeywordSource, SearchOutcome};
    use crate::query::{KeywordSearchEngine, QueryResult};
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;

    type LocalEngine = KeywordSearchEngine<OpenRouterClient, MemoryStorage>;

    fn directory() -> Vec<Teacher> {
        let mut teachers = vec![
            Teacher::new(1, "Jānis Kalniņš")
                .with_degree("Dr. sc. ing.")
                .with_position("profesors")
                .with_department("Datoru sistēmu institūts")
                .with_courses(["Programmēšana I"])
                .with_email("janis.kalnins@lbtu.lv"),
            Teacher::new(2, "Ilze Ozola")
                .with_degree("Mg. sc. ing.")
                .with_position("lektore")
                .with_department("Matemātikas institūts"),
            Teacher::new(3, "Pēteris Liepa")
                .with_degree("Mg. math.")
                .with_position("docents")
                .with_department("Matemātikas institūts"),
        ];
        teachers.extend((4..10).map(|i| {
            Teacher::new(i, format!("Maģistrs {}", i))
                .with_degree("Mg. oec.")
                .with_department("Ekonomikas institūts")
        }));
        teachers
    }

    fn server() -> ApiServer<LocalEngine> {
        let table = DegreeTable::shared();
        let normalizer = KeywordNormalizer::local_only(KeywordExtractor::new(table.clone()));
        let engine = KeywordSearchEngine::new(normalizer, MemoryStorage::new(directory()), table.clone());
        ApiServer::new(engine, table)
    }

    // Mock SearchEngine that always faults
    struct FailingEngine;

    #[async_trait]
    impl SearchEngine for FailingEngine {
        async fn search(&self, _query: &str) -> QueryResult<SearchOutcome> {
            Err(QueryError::Other("index corrupted".to_string()))
        }

        async fn list_all(&self) -> SearchOutcome {
            SearchOutcome {
                keywords_used: String::new(),
                ai_was_used: false,
                keyword_source: KeywordSource::Unfiltered,
                results: Vec::new(),
            }
        }

        fn ai_configured(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_request_parsing() {
        let request: ApiRequest =
            serde_json::from_str(r#"{"route": "search", "query": "docenti"}"#).unwrap();
        assert_eq!(
            request,
            ApiRequest::Search {
                query: Some("docenti".to_string())
            }
        );

        let request: ApiRequest = serde_json::from_str(r#"{"route": "test-ai"}"#).unwrap();
        assert_eq!(request, ApiRequest::TestAi { query: None });

        let request: ApiRequest = serde_json::from_str(r#"{"route": "health"}"#).unwrap();
        assert_eq!(request, ApiRequest::Health);
    }

    #[test]
    fn test_teacher_dto_keys() {
        let dto = TeacherDto::from(directory().remove(0));
        let value = serde_json::to_value(&dto).unwrap();

        assert_eq!(value["vārds"], "Jānis Kalniņš");
        assert_eq!(value["grāds"], "Dr. sc. ing.");
        assert_eq!(value["nodaļa"], "Datoru sistēmu institūts");
        assert_eq!(value["kursi"][0], "Programmēšana I");
        assert_eq!(value["epasts"], "janis.kalnins@lbtu.lv");
        assert!(value.get("pētniecība").is_none());
        assert_eq!(value["id"], 1);
    }

    #[tokio::test]
    async fn test_search_route() {
        let response = server()
            .handle(ApiRequest::Search {
                query: Some("docenti".to_string()),
            })
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body["oriģinālaisVaicājums"], "docenti");
        assert_eq!(response.body["apstrādātieAtslēgvārdi"], "docents");
        assert_eq!(response.body["aiLietots"], false);
        assert_eq!(response.body["aiPiegādātājs"], "OpenRouter");
        assert_eq!(response.body["atrastieSkaits"], 1);
        assert_eq!(response.body["rezultāti"][0]["vārds"], "Pēteris Liepa");
        assert!(response.body["laiks"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_blank_search_is_400() {
        let server = server();
        for query in [None, Some("   ".to_string())] {
            let response = server.handle(ApiRequest::Search { query }).await;
            assert_eq!(response.status, 400);
            assert_eq!(response.body["ziņojums"], EMPTY_QUERY_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_engine_fault_is_500() {
        let server = ApiServer::new(FailingEngine, DegreeTable::shared());
        let response = server
            .handle(ApiRequest::Search {
                query: Some("docenti".to_string()),
            })
            .await;

        assert_eq!(response.status, 500);
        assert_eq!(response.body["kļūda"], "Servera kļūda");
        assert!(!response.body.to_string().contains("index corrupted"));
    }

    #[tokio::test]
    async fn test_teachers_route() {
        let response = server().handle(ApiRequest::Teachers).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body["kopējaisSkaits"], 9);
        assert_eq!(response.body["pasniedzēji"][0]["vārds"], "Jānis Kalniņš");
        assert_eq!(response.body["pasniedzēji"][0]["epasts"], "janis.kalnins@lbtu.lv");
        assert_eq!(response.body["pasniedzēji"][0]["pētniecība"], "");
        assert_eq!(response.body["pasniedzēji"][0]["profilaLinks"], "");
    }

    #[tokio::test]
    async fn test_stats_route() {
        let response = server().handle(ApiRequest::Stats).await;
        let body = &response.body;

        assert_eq!(body["kopāPasniedzēju"], 9);
        assert_eq!(body["grāduSadalījums"]["Maģistri (Mg.)"], 8);
        assert_eq!(body["grāduSadalījums"]["Doktori (Dr./PhD)"], 1);
        assert_eq!(body["grāduSadalījums"]["Citi/bez grāda"], 0);
        assert_eq!(body["nodaļas"][0][0], "Ekonomikas institūts");
        assert_eq!(body["nodaļas"][0][1], 6);
        assert_eq!(body["nodaļas"][1][0], "Matemātikas institūts");
        assert_eq!(body["arAI"], false);
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = server().handle(ApiRequest::Health).await;
        let body = &response.body;

        assert_eq!(body["statuss"], "Vesels");
        assert_eq!(body["versija"], crate::VERSION);
        assert_eq!(body["pasniedzējuSkaits"], 9);
        assert_eq!(body["statistika"]["doktori"], 1);
        assert_eq!(body["darbībasLaiks"], "0 minūtes");
    }

    #[tokio::test]
    async fn test_test_ai_defaults_and_truncates() {
        let response = server().handle(ApiRequest::TestAi { query: None }).await;
        let body = &response.body;

        assert_eq!(body["testaVaicājums"], DEFAULT_TEST_QUERY);
        assert_eq!(body["iegūtieAtslēgvārdi"], "Mg., maģistrs");
        assert_eq!(body["atrastiePasniedzēji"], 8);
        assert_eq!(body["pasniedzējuVārdi"].as_array().unwrap().len(), 5);
        assert_eq!(body["aiSistēma"], LOCAL_SYSTEM_LABEL);
    }

    #[tokio::test]
    async fn test_index_route() {
        let response = server().with_ai_model("test/model").handle(ApiRequest::Index).await;

        assert_eq!(response.body["aiModelis"], "test/model");
        assert_eq!(response.body["aiPieejams"], false);
        assert_eq!(response.body["maršruti"]["testetAI"], "test-ai");
    }

    #[tokio::test]
    async fn test_unparseable_line_is_400() {
        let server = server();
        let response = server.handle_line("{ nope").await;
        assert_eq!(response.status, 400);

        let response = server.handle_line(r#"{"route": "delete"}"#).await;
        assert_eq!(response.status, 400);
    }
}
