//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! and serves `static/` on a local port.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::process::{Command, Stdio};
    use std::{env, thread, time::Duration};

    use anyhow::{bail, Context, Result};

    const DEFAULT_PORT: &str = "8000";

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        log::info!("building WASM pkg");
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
        {
            Ok(st) if st.success() => {}
            Ok(st) => bail!("wasm-pack exited with {st}"),
            Err(_) => log::warn!(
                "wasm-pack not found in PATH, serving whatever is already in static/pkg \
                 (https://rustwasm.github.io/wasm-pack/)"
            ),
        }

        let port = env::var("BEAMS_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        log::info!("serving static/ at http://127.0.0.1:{port}");
        let mut server = Command::new("python3")
            .args(["-m", "http.server", &port, "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to start http server (is python3 installed?)")?;

        loop {
            if let Some(status) = server.try_wait().context("http server vanished")? {
                bail!("http server exited with {status}");
            }
            thread::sleep(Duration::from_secs(1));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
