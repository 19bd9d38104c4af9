//! Cliente mínimo para `generateContent` de Gemini
//!
//! Lo comparten el sugeridor de rutas y el asesor de servicios. Siempre
//! pide respuesta JSON y tolera que el modelo la envuelva en un bloque
//! ```json.

use regex::Regex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::AiConfig;
use crate::utils::errors::{AppError, AppResult};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl GeminiClient {
    /// `None` si no hay API key configurada
    pub fn from_config(config: &AiConfig, http: Client) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            http,
            api_key,
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            timeout: config.timeout,
        })
    }

    pub async fn generate_text(&self, prompt: &str) -> AppResult<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                temperature: 0.2,
            },
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Gemini no respondió: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detalle = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Gemini respondió {}: {}",
                status,
                detalle.chars().take(300).collect::<String>()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Respuesta de Gemini ilegible: {}", e)))?;

        parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .ok_or_else(|| AppError::ExternalApi("Gemini no devolvió texto".to_string()))
    }

    /// Generar y deserializar una respuesta JSON
    pub async fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> AppResult<T> {
        let texto = self.generate_text(prompt).await?;
        serde_json::from_str(extract_json_block(&texto)).map_err(|e| {
            log::warn!("⚠️ Respuesta de Gemini no interpretable: {}", texto);
            AppError::ExternalApi(format!("La respuesta del modelo no es JSON válido: {}", e))
        })
    }
}

fn fence_regex() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").ok())
        .as_ref()
}

/// Extraer el objeto JSON de una respuesta que puede traer texto alrededor
pub fn extract_json_block(texto: &str) -> &str {
    if let Some(captura) = fence_regex().and_then(|re| re.captures(texto)).and_then(|c| c.get(1)) {
        return captura.as_str();
    }
    match (texto.find('{'), texto.rfind('}')) {
        (Some(inicio), Some(fin)) if inicio < fin => &texto[inicio..=fin],
        _ => texto.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_con_bloque() {
        let texto = "Claro:\n```json\n{\"orden\": [\"a\"]}\n```\n";
        assert_eq!(extract_json_block(texto), "{\"orden\": [\"a\"]}");
    }

    #[test]
    fn test_extract_json_sin_bloque() {
        assert_eq!(extract_json_block("  {\"a\": 1} "), "{\"a\": 1}");
        assert_eq!(extract_json_block("Resultado: {\"a\": 1} listo"), "{\"a\": 1}");
    }

    #[test]
    fn test_sin_api_key_no_hay_cliente() {
        let config = AiConfig::default();
        assert!(GeminiClient::from_config(&config, Client::new()).is_none());
    }

    #[test]
    fn test_endpoint_incluye_modelo() {
        let config = AiConfig {
            api_key: Some("clave".to_string()),
            ..AiConfig::default()
        };
        let client = GeminiClient::from_config(&config, Client::new()).unwrap();
        assert!(client.endpoint.ends_with("/models/gemini-2.5-flash:generateContent"));
    }
}
