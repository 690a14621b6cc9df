use gloo::net::http::Request;
use tohu_kaiako_core::{GenerateRequest, GenerationService, ServiceReply, TransportError};

const DEFAULT_ENDPOINT: &str = "/api/generate_pack";

pub(crate) fn generate_endpoint() -> String {
    option_env!("TOHU_KAIAKO_API_URL")
        .or(option_env!("TRUNK_PUBLIC_API_URL"))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_ENDPOINT)
        .to_string()
}

/// Posts generation requests as JSON and hands back the raw reply.
#[derive(Clone, Debug)]
pub(crate) struct HttpGenerationService {
    endpoint: String,
}

impl HttpGenerationService {
    pub(crate) fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl GenerationService for HttpGenerationService {
    async fn submit(&self, request: &GenerateRequest) -> Result<ServiceReply, TransportError> {
        let response = Request::post(&self.endpoint)
            .json(request)
            .map_err(|err| TransportError(err.to_string()))?
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        let status = response.status();
        // Unreadable bodies fall through to the generic failure message.
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                gloo::console::warn!("generate: response body unreadable", err.to_string());
                String::new()
            }
        };
        Ok(ServiceReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn endpoint_defaults_to_the_same_origin_api() {
        if option_env!("TOHU_KAIAKO_API_URL").is_none() && option_env!("TRUNK_PUBLIC_API_URL").is_none() {
            assert_eq!(generate_endpoint(), DEFAULT_ENDPOINT);
        }
    }
}
