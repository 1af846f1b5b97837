//! Binary tests for the `lazytimer` command.
//!
//! These tests run the compiled binary and check its output:
//! - Listing commands (`presets`, `completions`)
//! - Argument validation
//! - The `run` front-end driven from stdin

use assert_cmd::Command;
use predicates::prelude::*;

fn lazytimer() -> Command {
    let mut cmd = Command::cargo_bin("lazytimer").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Listing commands
// ============================================================================

mod listing {
    use super::*;

    #[test]
    fn test_presets_lists_default() {
        lazytimer()
            .arg("presets")
            .assert()
            .success()
            .stdout(predicate::str::contains("Ocean Depth"))
            .stdout(predicate::str::contains("* 10"));
    }

    #[test]
    fn test_completions_bash() {
        lazytimer()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("lazytimer"));
    }

    #[test]
    fn test_no_args_prints_help() {
        lazytimer()
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }
}

// ============================================================================
// Argument validation
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn test_work_out_of_range() {
        lazytimer()
            .args(["run", "--work", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--work"));
    }

    #[test]
    fn test_unknown_display_mode() {
        lazytimer()
            .args(["run", "--display", "fullscreen"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown display mode"));
    }

    #[test]
    fn test_unknown_action() {
        lazytimer()
            .args(["test-action", "--action", "dance"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown completion action"));
    }
}

// ============================================================================
// Run front-end
// ============================================================================

mod run {
    use super::*;

    #[test]
    fn test_run_quit_prints_initial_status() {
        lazytimer()
            .args(["run", "--no-sound"])
            .write_stdin("quit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Pomodoro | 🎯 Focus Time | 25:00 | paused | sessions: 0 | Standard Window",
            ))
            .stderr(predicate::str::contains("[surface] Standard Window shown"))
            .stderr(predicate::str::contains("[menubar] Timer (timer.circle)"));
    }

    #[test]
    fn test_run_ends_at_end_of_input() {
        lazytimer()
            .args(["run", "--no-sound"])
            .write_stdin("")
            .assert()
            .success();
    }

    #[test]
    fn test_run_json_output() {
        lazytimer()
            .args(["run", "--no-sound", "--json", "--work", "10"])
            .write_stdin("quit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"mode\":\"pomodoro\""))
            .stdout(predicate::str::contains("\"formatted_time\":\"10:00\""));
    }

    #[test]
    fn test_run_initial_overlay() {
        lazytimer()
            .args(["run", "--no-sound", "--display", "overlay"])
            .write_stdin("quit\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("[surface] Full Overlay shown"));
    }

    #[test]
    fn test_run_reports_bad_input() {
        lazytimer()
            .args(["run", "--no-sound"])
            .write_stdin("juggle\nquit\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn test_run_menu_listing() {
        lazytimer()
            .args(["run", "--no-sound"])
            .write_stdin("menu\nquit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Quit LazyTimer"));
    }
}
