//! Integration tests for the `fice` binary.
//!
//! Every test runs the real binary with `XDG_CONFIG_HOME` and
//! `XDG_DATA_HOME` pointing into its own temp dir, so session, layout and
//! config files never touch the developer's home.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;
use tempfile::TempDir;

const FICE_BIN: &str = env!("CARGO_BIN_EXE_fice");

/// Isolated home for one test.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(FICE_BIN);
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env_remove("FICE_LOG")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy");
        cmd
    }

    fn storage_path(&self) -> PathBuf {
        self.dir
            .path()
            .join("data")
            .join("fice-dashboard")
            .join("storage.json")
    }

    fn config_path(&self) -> PathBuf {
        self.dir
            .path()
            .join("config")
            .join("fice-dashboard")
            .join("config.toml")
    }

    fn login(&self, email: &str) {
        self.cmd().args(["login", email]).assert().success();
    }

    fn write_config(&self, content: &str) {
        let path = self.config_path();
        std::fs::create_dir_all(path.parent().expect("config dir")).expect("mkdir");
        std::fs::write(&path, content).expect("write config");
    }
}

/// Answers one HTTP request with `status` and `body`; joins to the raw request.
fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = format!("http://{}", listener.local_addr().expect("local addr"));
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read line");
            if let Some(v) = line.to_lowercase().strip_prefix("content-length:") {
                content_length = v.trim().parse().expect("content length");
            }
            request.push_str(&line);
            if line == "\r\n" {
                break;
            }
        }
        let mut payload = vec![0u8; content_length];
        reader.read_exact(&mut payload).expect("read body");
        request.push_str(&String::from_utf8_lossy(&payload));
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        reader
            .get_mut()
            .write_all(response.as_bytes())
            .expect("write response");
        request
    });
    (addr, handle)
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[test]
fn test_whoami_anonymous() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in (viewing u_user)"));
}

#[test]
fn test_login_persists_session() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["login", "user@devioz.pe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as user@devioz.pe (User)"));
    assert!(sandbox.storage_path().exists());

    sandbox
        .cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("user@devioz.pe (u_user, User)"));
}

#[test]
fn test_login_unknown_email_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["login", "nobody@devioz.pe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
    assert!(!sandbox.storage_path().exists());
}

#[test]
fn test_logout() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));

    sandbox.login("admin@devioz.pe");
    sandbox
        .cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    sandbox
        .cmd()
        .arg("whoami")
        .assert()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_role_requires_login() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["role", "admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_role_switch_updates_session() {
    let sandbox = Sandbox::new();
    sandbox.login("user@devioz.pe");
    sandbox
        .cmd()
        .args(["role", "admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Role set to Admin"));
    sandbox
        .cmd()
        .arg("whoami")
        .assert()
        .stdout(predicate::str::contains("(u_user, Admin)"));
}

#[test]
fn test_register_without_backend_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["register", "new@devioz.pe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TALC base URL is not configured"));
    assert!(!sandbox.storage_path().exists());
}

#[test]
fn test_register_posts_to_backend() {
    let sandbox = Sandbox::new();
    let (addr, handle) = serve_once("201 Created", r#"{"id":"u_new"}"#);
    sandbox.write_config(&format!("[backend]\ntalc_base_url = \"{}\"\n", addr));

    sandbox
        .cmd()
        .args(["register", "new@devioz.pe", "--password", "s3cret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered new@devioz.pe"));

    let request = handle.join().expect("server thread").to_lowercase();
    assert!(request.starts_with("post /auth/register"));
    assert!(request.contains(r#""email":"new@devioz.pe""#));
}

#[test]
fn test_register_reports_backend_error() {
    let sandbox = Sandbox::new();
    let (addr, handle) = serve_once("409 Conflict", r#"{"message":"Email already registered"}"#);
    sandbox.write_config(&format!("[backend]\ntalc_base_url = \"{}\"\n", addr));

    sandbox
        .cmd()
        .args(["register", "user@devioz.pe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Email already registered"));
    handle.join().expect("server thread");
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn test_layout_show_default() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["layout", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Layout (default)"))
        .stdout(predicate::str::contains(" 1. identity_summary"))
        .stdout(predicate::str::contains(" 5. recent_audit"));
}

#[test]
fn test_layout_show_uses_role_default() {
    let sandbox = Sandbox::new();
    sandbox.login("admin@devioz.pe");
    sandbox
        .cmd()
        .args(["layout", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Layout (default for Admin)"))
        .stdout(predicate::str::contains(" 1. integrity_status"));
}

#[test]
fn test_layout_reset_writes_custom_layout() {
    let sandbox = Sandbox::new();
    sandbox.login("admin@devioz.pe");
    sandbox
        .cmd()
        .args(["layout", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Layout reset"));

    let storage = std::fs::read_to_string(sandbox.storage_path()).expect("storage written");
    assert!(storage.contains("fice.dashboard.layout.v1"));

    sandbox
        .cmd()
        .args(["layout", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Layout (custom)"))
        .stdout(predicate::str::contains(" 1. identity_summary"));
}

#[test]
fn test_layout_path() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["layout", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            sandbox.storage_path().display().to_string(),
        ));
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

#[test]
fn test_list_inputs_for_fallback_user() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["list", "inputs"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID"))
        .stdout(predicate::str::contains("savings"))
        .stdout(predicate::str::contains("S/ 800"));
}

#[test]
fn test_list_users() {
    let sandbox = Sandbox::new();
    sandbox.login("user@devioz.pe");
    sandbox
        .cmd()
        .args(["list", "users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin@devioz.pe"))
        .stdout(predicate::str::contains("user@devioz.pe"));
}

#[test]
fn test_account_tables_require_login() {
    let sandbox = Sandbox::new();
    for table in ["users", "sessions"] {
        sandbox
            .cmd()
            .args(["list", table])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in"));
    }
}

#[test]
fn test_list_snapshots_for_user_without_identity_is_empty() {
    let sandbox = Sandbox::new();
    sandbox.login("admin@devioz.pe");
    sandbox
        .cmd()
        .args(["list", "snapshots"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No snapshots found."));
}

#[test]
fn test_list_unknown_table_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["list", "ledgers"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ledgers"));
}

#[test]
fn test_add_input_prints_recalculated_identity() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add-input", "salary", "S/ 4000", "--reason", "Raise"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added salary input"))
        .stdout(predicate::str::contains("Stability"))
        .stdout(predicate::str::contains(": Raise"));
}

#[test]
fn test_add_input_without_identity_fails() {
    let sandbox = Sandbox::new();
    sandbox.login("admin@devioz.pe");
    sandbox
        .cmd()
        .args(["add-input", "salary", "S/ 4000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Financial identity not found"));
}

#[test]
fn test_integrity_ok() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("integrity")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("OK"));
}

#[test]
fn test_integrity_simulated_drift_warns() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["integrity", "--simulate-drift"])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("WARN  Ledger drift detected"))
        .stdout(predicate::str::contains("latest snapshot snp_2 differs"));
}

#[test]
fn test_snapshots_compare() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["snapshots", "compare"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("snp_2 vs snp_1"))
        .stdout(predicate::str::is_match(r"(?m)^income_stability_score\s+78\s+76\s+\*").unwrap())
        .stdout(predicate::str::is_match(r"(?m)^income_type\s+fixed\s+fixed\s*$").unwrap());
}

#[test]
fn test_snapshots_compare_needs_two_snapshots() {
    let sandbox = Sandbox::new();
    sandbox.login("admin@devioz.pe");
    sandbox
        .cmd()
        .args(["snapshots", "compare"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Need at least 2 snapshots to compare."));
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[test]
fn test_user_block_and_activate() {
    let sandbox = Sandbox::new();
    sandbox.login("admin@devioz.pe");
    sandbox
        .cmd()
        .args(["user", "block", "u_user"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("User u_user is now blocked"))
        .stdout(predicate::str::contains("user@devioz.pe"));
    sandbox
        .cmd()
        .args(["user", "activate", "u_user"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User u_user is now active"));
}

#[test]
fn test_user_block_unknown_id_fails() {
    let sandbox = Sandbox::new();
    sandbox.login("admin@devioz.pe");
    sandbox
        .cmd()
        .args(["user", "block", "u_ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User not found: u_ghost"));
}

#[test]
fn test_admin_commands_require_admin() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["session", "revoke", "s_user_1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));

    sandbox.login("user@devioz.pe");
    sandbox
        .cmd()
        .args(["user", "block", "u_admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Admin role required"));
}

#[test]
fn test_session_revoke() {
    let sandbox = Sandbox::new();
    sandbox.login("admin@devioz.pe");
    sandbox
        .cmd()
        .args(["session", "revoke", "s_user_1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Session s_user_1 revoked"))
        .stdout(predicate::str::contains("revoked"));
    sandbox
        .cmd()
        .args(["session", "revoke", "s_missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session not found: s_missing"));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_path() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            sandbox.config_path().display().to_string(),
        ));
}

#[test]
fn test_config_init_then_validate() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration at"));
    assert!(sandbox.config_path().exists());

    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    sandbox
        .cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success();
    assert!(sandbox.config_path().with_extension("toml.backup").exists());

    sandbox
        .cmd()
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_invalid_config_is_reported() {
    let sandbox = Sandbox::new();
    let path = sandbox.config_path();
    std::fs::create_dir_all(path.parent().expect("config dir")).expect("mkdir");
    std::fs::write(&path, "[tui]\ntick_rate = \"fast\"\n").expect("write config");

    sandbox
        .cmd()
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration for tui.tick_rate"));

    sandbox
        .cmd()
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Config error:"));
}
