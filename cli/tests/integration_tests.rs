use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const PLAYER_PAGE: &str = r#"<html>
<head><title>Chess-Results Server Chess-results.com - Club Championship - Player info</title></head>
<body>
<div class="defaultDialog">
  <h2>Player info</h2>
  <table><tr><td>Name</td><td>Quinn Mark</td></tr></table>
  <table>
    <tr class="CRg1b"><td>Rd.</td><td>Bo.</td><td></td><td>Name</td><td>Rtg</td><td>FED</td><td>Pts.</td><td>Res.</td></tr>
    <tr class="CRg1"><td>2</td><td>1</td><td>FM</td><td>Dwyer Daniel</td><td>1834</td><td>IRL</td><td>3</td><td>w 1</td></tr>
    <tr class="CRg2"><td>3</td><td>1</td><td></td><td>Thoele Wolfgang Dr.</td><td>0</td><td>GER</td><td>2</td><td>s &frac12;</td></tr>
  </table>
</div>
</body>
</html>
"#;

const RATING_LIST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<playerslist>
<player><country>IRL</country><rating>1834</rating><rapid_rating></rapid_rating><blitz_rating></blitz_rating><flag></flag></player>
<player><country>IRL</country><rating></rating><rapid_rating>1510</rapid_rating><blitz_rating></blitz_rating><flag>w</flag></player>
<player><country>ENG</country><rating>2150</rating><rapid_rating></rapid_rating><blitz_rating></blitz_rating><flag>i</flag></player>
</playerslist>
"#;

fn crosstable(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crosstable"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run crosstable")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}

#[test]
fn test_report_from_saved_page() {
    let dir = TempDir::new().unwrap();
    let page = write(&dir, "player.html", PLAYER_PAGE);

    let output = crosstable(&["report", path_str(&page)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let expected = format!(
        "Event,Club Championship\n\
         Start,??/??/20??\n\
         End,??/??/20??\n\
         Rounds,2\n\
         Website,{}\n\
         \n\
         Player,????,Quinn,Mark\n\
         1,1,W,Dwyer,Daniel,1834,FM,IRL\n\
         2,=,B,Thoele,Wolfgang Dr.,,,GER\n\
         Total,1.5\n",
        path_str(&page)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn test_report_json_format() {
    let dir = TempDir::new().unwrap();
    let page = write(&dir, "player.html", PLAYER_PAGE);

    let output = crosstable(&["report", path_str(&page), "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["event"], "Club Championship");
    assert_eq!(value["players"][0]["name"], "Quinn,Mark");
    assert_eq!(value["players"][0]["score"], 1.5);
}

#[test]
fn test_report_to_output_file() {
    let dir = TempDir::new().unwrap();
    let page = write(&dir, "player.html", PLAYER_PAGE);
    let target = dir.path().join("reports").join("quinn.txt");

    let output = crosstable(&["report", path_str(&page), "-o", path_str(&target)]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.starts_with("Event,Club Championship\n"));
    assert!(written.ends_with("Total,1.5\n"));
}

#[test]
fn test_report_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.html");

    let output = crosstable(&["report", path_str(&missing)]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error:"));
}

#[test]
fn test_league_report_requires_rounds() {
    let output = crosstable(&["report", "http://www.4nclresults.co.uk/2018-19/4ncl/1/2b/export/"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("need to specify round numbers"), "stderr: {stderr}");
}

#[test]
fn test_report_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let page = write(&dir, "player.html", PLAYER_PAGE);
    let config = write(&dir, "crosstable.yaml", "timeout_secs: [not, a, number]\n");

    let output = crosstable(&["report", path_str(&page), "--config", path_str(&config)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}

#[test]
fn test_page_without_results_fails() {
    let dir = TempDir::new().unwrap();
    let page = write(&dir, "empty.html", "<html><body><p>Nothing here</p></body></html>");

    let output = crosstable(&["report", path_str(&page)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not locate"));
}

#[test]
fn test_stats_counts_federation() {
    let dir = TempDir::new().unwrap();
    let list = write(&dir, "ratings.xml", RATING_LIST);

    let output = crosstable(&["stats", path_str(&list)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total players: 3\n"));
    assert!(stdout.contains("Total IRL players: 2\n"));
    assert!(stdout.contains("Total active IRL players with blitz or rapid but not standard: 1\n"));
    assert!(stdout.contains("1800\t   1\n"));
}

#[test]
fn test_stats_other_federation() {
    let dir = TempDir::new().unwrap();
    let list = write(&dir, "ratings.xml", RATING_LIST);

    let output = crosstable(&["stats", path_str(&list), "--federation", "ENG"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total ENG players: 1\n"));
    assert!(stdout.contains("Total active ENG players: 0\n"));
}
