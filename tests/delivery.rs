//! Delivery adapter tests
//!
//! Listener tests run against a one-shot HTTP server on an ephemeral port.

mod common;

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use nvim_wizard::catalog::TargetOs;
use nvim_wizard::config::WizardConfig;
use nvim_wizard::delivery::installer::{installer_script, script_file_name};
use nvim_wizard::delivery::{
    download, ping, save, write_init_lua, DeliveryContext, DeliveryError, SaveEncoding, INIT_LUA,
};
use tempfile::tempdir;

// ============================================================================
// Mock listener
// ============================================================================

#[derive(Debug)]
struct Recorded {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serve one canned response per connection, then return what was received
fn serve(responses: Vec<(u16, &'static str)>) -> (u16, JoinHandle<Vec<Recorded>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();

    let handle = thread::spawn(move || {
        let mut recorded = Vec::new();
        for (status, body) in responses {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("read request line");

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("read header");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((k, v)) = line.split_once(':') {
                    headers.push((k.trim().to_string(), v.trim().to_string()));
                }
            }

            let length = headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.parse::<usize>().ok())
                .unwrap_or(0);
            let mut buf = vec![0u8; length];
            reader.read_exact(&mut buf).expect("read body");

            let reply = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let mut stream = stream;
            stream.write_all(reply.as_bytes()).expect("write reply");
            stream.flush().expect("flush");

            recorded.push(Recorded {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8_lossy(&buf).into_owned(),
            });
        }
        recorded
    });

    (port, handle)
}

fn context_for(port: u16, token: Option<&str>) -> DeliveryContext {
    DeliveryContext::new(WizardConfig {
        listener_port: port,
        listener_token: token.map(str::to_string),
        ..WizardConfig::default()
    })
}

/// A port nothing is listening on
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

// ============================================================================
// Listener
// ============================================================================

#[test]
fn test_ping_sends_bearer_token() {
    let (port, server) = serve(vec![(200, r#"{"status":"ok"}"#)]);
    let mut ctx = context_for(port, Some("s3cret"));

    ping(&mut ctx).expect("ping should succeed");

    let requests = server.join().expect("server thread");
    assert!(requests[0].request_line.starts_with("GET /ping"));
    assert_eq!(requests[0].header("Authorization"), Some("Bearer s3cret"));
}

#[test]
fn test_ping_unreachable() {
    let mut ctx = context_for(closed_port(), None);
    match ping(&mut ctx) {
        Err(DeliveryError::Unreachable(_)) => {}
        other => panic!("Expected Unreachable, got {:?}", other),
    }
}

#[test]
fn test_save_json_body() {
    let (port, server) = serve(vec![(
        200,
        r#"{"success":true,"message":"saved","path":"/home/me/.config/nvim/init.lua"}"#,
    )]);
    let mut ctx = context_for(port, None);
    let text = common::render(&common::python_selection());

    let reply = save(&mut ctx, INIT_LUA, &text, SaveEncoding::Json).expect("save should succeed");
    assert!(reply.success);
    assert_eq!(reply.path.as_deref(), Some("/home/me/.config/nvim/init.lua"));

    let requests = server.join().expect("server thread");
    let request = &requests[0];
    assert!(request.request_line.starts_with("POST /save"));
    assert!(request.header("Authorization").is_none());
    assert!(request
        .header("Content-Type")
        .is_some_and(|ct| ct.starts_with("application/json")));

    let body: serde_json::Value = serde_json::from_str(&request.body).expect("JSON body");
    assert_eq!(body["filename"], "init.lua");
    assert_eq!(body["content"], text.as_str());
}

#[test]
fn test_save_multipart_body() {
    let (port, server) = serve(vec![(200, r#"{"success":true}"#)]);
    let mut ctx = context_for(port, Some("tok"));

    save(&mut ctx, INIT_LUA, "vim.opt.number = true\n", SaveEncoding::Multipart)
        .expect("save should succeed");

    let requests = server.join().expect("server thread");
    let request = &requests[0];
    let content_type = request.header("Content-Type").expect("content type");
    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .expect("multipart boundary");

    assert!(request.body.starts_with(&format!("--{}\r\n", boundary)));
    assert!(request.body.contains("name=\"file\"; filename=\"init.lua\""));
    assert!(request.body.contains("vim.opt.number = true\n"));
    assert!(request.body.ends_with(&format!("--{}--\r\n", boundary)));
    assert_eq!(request.header("Authorization"), Some("Bearer tok"));
}

#[test]
fn test_save_rejected_with_listener_message() {
    let (port, server) = serve(vec![(401, r#"{"error":"Invalid or missing token"}"#)]);
    let mut ctx = context_for(port, Some("wrong"));

    match save(&mut ctx, INIT_LUA, "-- x\n", SaveEncoding::Json) {
        Err(DeliveryError::Rejected { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid or missing token");
        }
        other => panic!("Expected Rejected, got {:?}", other),
    }
    server.join().expect("server thread");
}

#[test]
fn test_save_rejected_without_json_body() {
    let (port, server) = serve(vec![(500, "boom")]);
    let mut ctx = context_for(port, None);

    match save(&mut ctx, INIT_LUA, "-- x\n", SaveEncoding::Multipart) {
        Err(DeliveryError::Rejected { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "HTTP 500");
        }
        other => panic!("Expected Rejected, got {:?}", other),
    }
    server.join().expect("server thread");
}

#[test]
fn test_context_reuses_agent_across_calls() {
    let (port, server) = serve(vec![(200, "{}"), (200, r#"{"success":true}"#)]);
    let mut ctx = context_for(port, None);

    ping(&mut ctx).expect("ping");
    save(&mut ctx, INIT_LUA, "-- x\n", SaveEncoding::Json).expect("save");

    let requests = server.join().expect("server thread");
    assert_eq!(requests.len(), 2);
}

// ============================================================================
// Filesystem sinks
// ============================================================================

#[test]
fn test_directory_write_backs_up_existing_config() {
    let dir = tempdir().expect("temp dir");
    std::fs::write(dir.path().join(INIT_LUA), "-- old\n").expect("seed old config");

    let ctx = DeliveryContext::new(WizardConfig {
        target_dir: Some(dir.path().to_path_buf()),
        ..WizardConfig::default()
    });
    let written = write_init_lua(&ctx, "-- new\n").expect("write init.lua");

    assert_eq!(written.path, dir.path().join(INIT_LUA));
    assert_eq!(std::fs::read_to_string(&written.path).unwrap(), "-- new\n");
    let backup = written.backup.expect("backup made");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "-- old\n");
}

#[test]
fn test_directory_write_without_existing_config() {
    let dir = tempdir().expect("temp dir");
    let target = dir.path().join("nvim");
    let ctx = DeliveryContext::new(WizardConfig {
        target_dir: Some(target.clone()),
        ..WizardConfig::default()
    });

    let written = write_init_lua(&ctx, "-- fresh\n").expect("write init.lua");
    assert_eq!(written.path, target.join(INIT_LUA));
    assert!(written.backup.is_none());
}

#[test]
fn test_download_installer_script() {
    let dir = tempdir().expect("temp dir");
    let ctx = DeliveryContext::new(WizardConfig {
        output_dir: Some(dir.path().to_path_buf()),
        ..WizardConfig::default()
    });

    let selection = common::python_selection();
    let config = common::render(&selection);
    let script = installer_script(TargetOs::Linux, &selection, &config);
    let path = download(&ctx, script_file_name(TargetOs::Linux), &script).expect("download");

    assert_eq!(path, dir.path().join("install-nvim-config-linux.sh"));
    let saved = std::fs::read_to_string(path).expect("read script");
    assert!(saved.starts_with("#!/bin/bash"));
    assert!(saved.contains(&config));
}
