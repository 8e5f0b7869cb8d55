use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use response::{FieldNaming, Responder};
use serde::Serialize;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // required to enable CloudWatch error logging by the runtime
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    let responder = Responder::from_env()?;
    info!(config = ?responder.config(), "loaded response configuration");
    let responder_ref = &responder;

    run(service_fn(move |event: Request| async move {
        Ok::<Response<Body>, Error>(handle(responder_ref, &event))
    }))
    .await?;
    Ok(())
}

#[derive(Serialize, Debug)]
struct Status {
    service: &'static str,
    version: &'static str,
    naming: &'static str,
}

fn handle(responder: &Responder, event: &Request) -> Response<Body> {
    info!(method = %event.method(), path = event.uri().path(), "handling request");
    match *event.method() {
        Method::OPTIONS => responder.response(|r, res| r.no_content(res)),
        Method::GET => {
            let status = Status {
                service: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
                naming: match responder.config().naming {
                    FieldNaming::Short => "code",
                    FieldNaming::StatusCode => "statusCode",
                },
            };
            responder.response(|r, res| r.data(res, &status, StatusCode::OK))
        }
        ref method => {
            let message = format!("Method {} is not allowed", method);
            responder.response(|r, res| r.error(res, &message, StatusCode::METHOD_NOT_ALLOWED))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use response::ResponseConfig;
    use serde_json::{json, Value};

    fn request(method: Method) -> Request {
        let mut request = Request::new(Body::Empty);
        *request.method_mut() = method;
        request
    }

    fn json_body(response: &Response<Body>) -> Value {
        match response.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("expected a text body, got {:?}", other),
        }
    }

    #[test]
    fn preflight_returns_no_content() {
        let response = handle(&Responder::default(), &request(Method::OPTIONS));
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[test]
    fn get_returns_status_payload() {
        let response = handle(&Responder::default(), &request(Method::GET));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(&response),
            json!({
                "statusCode": 200,
                "data": {
                    "service": "api-status",
                    "version": env!("CARGO_PKG_VERSION"),
                    "naming": "statusCode"
                }
            })
        );
    }

    #[test]
    fn get_with_short_naming() {
        let responder = Responder::new(ResponseConfig::legacy_short());
        let response = handle(&responder, &request(Method::GET));
        let body = json_body(&response);
        assert_eq!(body["status"], 200);
        assert_eq!(body["data"]["naming"], "code");
        assert_eq!(
            response
                .headers()
                .get_all("access-control-allow-headers")
                .iter()
                .count(),
            5
        );
    }

    #[test]
    fn other_methods_are_rejected() {
        let response = handle(&Responder::default(), &request(Method::DELETE));
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            json_body(&response),
            json!({ "statusCode": 405, "message": "Method DELETE is not allowed" })
        );
    }
}
