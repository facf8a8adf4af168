//! Tiny static file server for the assets/ directory.
//!
//! Useful when testing on a headset: serve the models from the dev machine
//! and point the device at it. Browsers and headsets require HTTPS for
//! immersive sessions, so put this behind an HTTPS tunnel when testing
//! against real hardware.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::thread;

const BIND_ADDR: &str = "0.0.0.0:8080";
const ASSET_DIR: &str = "assets";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let listener = TcpListener::bind(BIND_ADDR)
        .with_context(|| format!("could not bind {BIND_ADDR}"))?;
    log::info!("serving {ASSET_DIR}/ on http://{BIND_ADDR}");
    log::info!("immersive sessions need HTTPS; tunnel this port when testing on a headset");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                thread::spawn(move || {
                    if let Err(err) = handle_connection(stream) {
                        log::warn!("request failed: {err}");
                    }
                });
            }
            Err(err) => log::warn!("accept failed: {err}"),
        }
    }
    Ok(())
}

fn handle_connection(stream: TcpStream) -> Result<()> {
    let peer = stream.peer_addr()?;
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let raw_path = parts.next().unwrap_or("/");

    if method != "GET" {
        return respond(stream, 405, "text/plain", b"method not allowed");
    }

    match sanitize(raw_path) {
        Some(path) => match std::fs::File::open(&path) {
            Ok(mut file) => {
                let mut body = Vec::new();
                match file.read_to_end(&mut body) {
                    Ok(_) => {
                        log::info!("{peer} GET {raw_path} -> 200 ({} bytes)", body.len());
                        respond(stream, 200, mime_for(&path), &body)
                    }
                    Err(err) => {
                        log::warn!("{peer} GET {raw_path} -> 500 ({err})");
                        respond(stream, 500, "text/plain", b"internal server error")
                    }
                }
            }
            Err(_) => {
                log::info!("{peer} GET {raw_path} -> 404");
                respond(stream, 404, "text/plain", b"not found")
            }
        },
        None => {
            log::warn!("{peer} GET {raw_path} -> 400 (rejected path)");
            respond(stream, 400, "text/plain", b"bad request")
        }
    }
}

fn respond(mut stream: TcpStream, status: u16, mime: &str, body: &[u8]) -> Result<()> {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Internal Server Error",
    };
    write!(
        stream,
        "HTTP/1.0 {status} {reason}\r\nContent-Type: {mime}\r\nContent-Length: {}\r\nAccess-Control-Allow-Origin: *\r\nConnection: close\r\n\r\n",
        body.len()
    )?;
    stream.write_all(body)?;
    Ok(())
}

/// Map a request path to a file under the asset directory, rejecting any
/// path that tries to escape it.
fn sanitize(raw_path: &str) -> Option<PathBuf> {
    let path = raw_path.split('?').next().unwrap_or("");
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let mut out = PathBuf::from(ASSET_DIR);
    for part in Path::new(trimmed).components() {
        match part {
            std::path::Component::Normal(segment) => out.push(segment),
            _ => return None,
        }
    }
    Some(out)
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("glb") => "model/gltf-binary",
        Some("gltf") => "model/gltf+json",
        Some("bin") => "application/octet-stream",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ktx2") => "image/ktx2",
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_rejects_traversal() {
        assert!(sanitize("/../Cargo.toml").is_none());
        assert!(sanitize("/models/../../etc/passwd").is_none());
        assert!(sanitize("/").is_none());
        assert_eq!(
            sanitize("/models/maya.glb?v=2"),
            Some(PathBuf::from("assets/models/maya.glb"))
        );
    }

    #[test]
    fn known_extensions_get_their_mime() {
        assert_eq!(mime_for(Path::new("assets/a.glb")), "model/gltf-binary");
        assert_eq!(mime_for(Path::new("assets/a.png")), "image/png");
        assert_eq!(
            mime_for(Path::new("assets/unknown.xyz")),
            "application/octet-stream"
        );
    }
}
