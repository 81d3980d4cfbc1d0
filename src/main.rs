//! Host-side helper: `cargo run` builds the nebula wasm bundle into
//! `static/pkg` and serves `static/` on a local HTTP port.
//!
//! `NEBULA_PORT` overrides the default port (8000).

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

use anyhow::{bail, Context, Result};

const DEFAULT_PORT: u16 = 8000;

fn port() -> Result<u16> {
    match env::var("NEBULA_PORT") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("NEBULA_PORT={raw:?} is not a port number")),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

fn main() -> Result<()> {
    let port = port()?;

    // 1. Build wasm bundle
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(st) => bail!(
            "wasm-pack finished with {st}. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/)."
        ),
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    // 2. Start simple HTTP server serving `static/`
    println!("Launching local server at http://127.0.0.1:{port} …");
    let mut server = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("failed to start http server (is python3 installed?)")?;

    // Keep process alive while the server runs
    loop {
        if let Some(status) = server.try_wait().context("polling http server")? {
            bail!("http server exited with {status}");
        }
        thread::sleep(Duration::from_secs(5));
    }
}
