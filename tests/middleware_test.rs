use serde_json::json;
use swagger_guard::{parse_swagger, Request, Response, ValidationMiddleware};

const HELLO_SPEC: &str = r#"
swagger: "2.0"
info:
  title: Hello API
  version: 1.0.0
basePath: /api
paths:
  /hello/{name}:
    get:
      parameters:
        - name: name
          in: path
          required: true
          type: string
        - name: punctuation
          in: query
          type: string
          default: "."
      responses:
        "200":
          description: A greeting
          schema:
            type: string
"#;

fn middleware() -> ValidationMiddleware {
    let spec = parse_swagger(HELLO_SPEC).expect("spec should load");
    ValidationMiddleware::new(&spec).expect("middleware should build")
}

#[test]
fn test_hello_round_trip() {
    let middleware = middleware();
    let request = Request::new("GET", "/api/hello/bob").with_query("punctuation", "!");

    let response = middleware
        .handle(&request, |checked| {
            let name = checked.parameter("name").unwrap().as_str().unwrap();
            let punctuation = checked.parameter("punctuation").unwrap().as_str().unwrap();
            Response::new(200).with_body(json!(format!("Hello {}{}", name, punctuation)))
        })
        .expect("a conforming exchange should pass");

    assert_eq!(response.status, 200);
    assert_eq!(response.body, Some(json!("Hello bob!")));
}

#[test]
fn test_default_punctuation_applies_when_absent() {
    let middleware = middleware();
    let request = Request::new("GET", "/api/hello/alice");

    let response = middleware
        .handle(&request, |checked| {
            let name = checked.parameter("name").unwrap().as_str().unwrap();
            let punctuation = checked.parameter("punctuation").unwrap().as_str().unwrap();
            Response::new(200).with_body(json!(format!("Hello {}{}", name, punctuation)))
        })
        .unwrap();

    assert_eq!(response.body, Some(json!("Hello alice.")));
}

#[test]
fn test_unregistered_path_is_404_and_handler_never_runs() {
    let middleware = middleware();
    let request = Request::new("GET", "/api/goodbye/bob");

    let err = middleware
        .handle(&request, |_| panic!("handler must not run"))
        .unwrap_err();
    assert_eq!(err.status(), 404);
}

#[test]
fn test_undeclared_method_is_405_not_404() {
    let middleware = middleware();
    let request = Request::new("POST", "/api/hello/bob");

    let err = middleware
        .handle(&request, |_| panic!("handler must not run"))
        .unwrap_err();
    assert_eq!(err.status(), 405);
}

#[test]
fn test_undeclared_status_code_is_500() {
    let middleware = middleware();
    let request = Request::new("GET", "/api/hello/bob");

    // only 200 is declared and there is no default entry
    let err = middleware
        .handle(&request, |_| Response::new(201).with_body(json!("created")))
        .unwrap_err();
    assert_eq!(err.status(), 500);
    assert!(err.message().contains("201"));
}

#[test]
fn test_response_schema_violation_is_500() {
    let middleware = middleware();
    let request = Request::new("GET", "/api/hello/bob");

    // declared schema is {type: string}; the handler emits an object
    let err = middleware
        .handle(&request, |_| {
            Response::new(200).with_body(json!({"greeting": "Hello bob."}))
        })
        .unwrap_err();
    assert_eq!(err.status(), 500);
    assert_eq!(err.message(), "Unmatching response format");
}

#[test]
fn test_parameter_failure_short_circuits_before_handler() {
    let spec = parse_swagger(
        r#"
swagger: "2.0"
paths:
  /things:
    get:
      parameters:
        - name: size
          in: query
          required: true
          type: integer
      responses:
        "200": {}
"#,
    )
    .unwrap();
    let middleware = ValidationMiddleware::new(&spec).unwrap();

    let request = Request::new("GET", "/things").with_query("size", "abc");
    let err = middleware
        .handle(&request, |_| panic!("handler must not run"))
        .unwrap_err();
    assert_eq!(err.status(), 400);
    assert!(err.message().contains("size"));
}

#[test]
fn test_lenient_mode_forwards_unmatched_routes() {
    let spec = parse_swagger(HELLO_SPEC).unwrap();
    let middleware = ValidationMiddleware::new(&spec).unwrap().lenient();

    let request = Request::new("GET", "/somewhere/else");
    let response = middleware
        .handle(&request, |checked| {
            assert!(!checked.is_routed());
            Response::new(204)
        })
        .expect("pass-through must not be validated");
    assert_eq!(response.status, 204);
}

#[test]
fn test_declared_response_headers_are_enforced() {
    let spec = parse_swagger(
        r#"
swagger: "2.0"
paths:
  /limited:
    get:
      responses:
        "200":
          schema:
            type: string
          headers:
            X-Rate-Limit:
              type: integer
            X-Region:
              type: string
              default: eu
"#,
    )
    .unwrap();
    let middleware = ValidationMiddleware::new(&spec).unwrap();
    let request = Request::new("GET", "/limited");

    // X-Region is absent but has a default; X-Rate-Limit is sent and numeric
    let response = middleware
        .handle(&request, |_| {
            Response::new(200)
                .with_body(json!("ok"))
                .with_header("X-Rate-Limit", "100")
        })
        .expect("conforming headers should pass");
    assert_eq!(response.header("x-rate-limit"), Some("100"));

    // a non-numeric rate limit breaks the header contract
    let err = middleware
        .handle(&request, |_| {
            Response::new(200)
                .with_body(json!("ok"))
                .with_header("X-Rate-Limit", "plenty")
        })
        .unwrap_err();
    assert_eq!(err.status(), 500);
}
