//! Command line behaviour of the `reactlint` binary.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const UNSORTED_INTERFACE: &str = "interface Shape {\n  width: number;\n  height: number;\n}\n";

fn reactlint() -> Result<Command> {
    let mut cmd = Command::cargo_bin("reactlint")?;
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

fn project(files: &[(&str, &str)]) -> Result<TempDir> {
    let temp = TempDir::new()?;
    for (name, content) in files {
        let path = temp.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(temp)
}

fn json_output(cmd: &mut Command) -> Result<serde_json::Value> {
    let output = cmd.output()?;
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_reports_findings_with_location() -> Result<()> {
    let temp = project(&[("src/shape.ts", UNSORTED_INTERFACE)])?;

    reactlint()?
        .arg(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("shape.ts:1:11"))
        .stdout(predicate::str::contains("sort-interfaces"))
        .stdout(predicate::str::contains(
            "TypeScript interface \"Shape\" must be sorted alphabetically",
        ))
        .stdout(predicate::str::contains("1 problem(s)"));
    Ok(())
}

#[test]
fn test_clean_project_exits_zero() -> Result<()> {
    let temp = project(&[(
        "App.tsx",
        "export const App = () => <div className=\"app\" id=\"root\" />;\n",
    )])?;

    reactlint()?
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All clean"));
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let temp = project(&[
        ("a.ts", UNSORTED_INTERFACE),
        ("b.tsx", "class C { m() { this.state.open = true; } }\n"),
    ])?;

    let json = json_output(reactlint()?.arg(temp.path()).arg("--json"))?;
    assert_eq!(json["filesAnalyzed"], 2);
    let findings = json["findings"].as_array().cloned().unwrap_or_default();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0]["ruleId"], "sort-interfaces");
    assert_eq!(findings[0]["line"], 1);
    assert!(findings[0]["fixes"]
        .as_array()
        .is_some_and(|fixes| !fixes.is_empty()));
    assert_eq!(findings[1]["ruleId"], "react-dont-mutate-state");
    assert_eq!(findings[1]["message"], "Do not mutate state.");
    Ok(())
}

#[test]
fn test_fix_rewrites_files() -> Result<()> {
    let temp = project(&[
        ("shape.ts", UNSORTED_INTERFACE),
        ("Button.tsx", "export const B = <button type=\"submit\" disabled />;\n"),
    ])?;

    reactlint()?
        .arg(temp.path())
        .arg("--fix")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed"));

    assert_eq!(
        fs::read_to_string(temp.path().join("shape.ts"))?,
        "interface Shape {\n  height: number;\n  width: number;\n}\n"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("Button.tsx"))?,
        "export const B = <button disabled type=\"submit\" />;\n"
    );

    // A second run has nothing left to do
    reactlint()?.arg(temp.path()).assert().success();
    Ok(())
}

#[test]
fn test_fix_keeps_unfixable_findings() -> Result<()> {
    let source = "interface P { b: string; a: string; }\nfunction f() { return new Promise(() => {}); }\n";
    let temp = project(&[("mixed.ts", source)])?;

    let json = json_output(reactlint()?.arg(temp.path()).arg("--fix").arg("--json"))?;
    assert_eq!(json["fixedFiles"][0]["fixesApplied"], 1);
    assert_eq!(json["findings"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["findings"][0]["ruleId"], "favor-async-to-new-promises");
    assert_eq!(json["findings"][0]["line"], 2);

    let fixed = fs::read_to_string(temp.path().join("mixed.ts"))?;
    assert!(fixed.starts_with("interface P { a: string; b: string; }"));
    Ok(())
}

#[test]
fn test_overlapping_fixes_reject_the_whole_file() -> Result<()> {
    // The fix for `A` rewrites the attribute holding `B`, so both cannot apply
    let source = "interface P { b: string; a: string; }\nexport const el = <A z={<B y x />} a />;\n";
    let temp = project(&[("Nested.tsx", source)])?;

    let json = json_output(reactlint()?.arg(temp.path()).arg("--fix").arg("--json"))?;
    assert_eq!(json["rejectedFixes"].as_array().map(Vec::len), Some(1));
    assert!(json["rejectedFixes"][0]["file"]
        .as_str()
        .is_some_and(|f| f.ends_with("Nested.tsx")));
    assert!(json["rejectedFixes"][0]["error"]
        .as_str()
        .is_some_and(|e| e.contains("overlap")));
    assert_eq!(json["fixedFiles"].as_array().map(Vec::len), Some(0));
    assert_eq!(json["findings"].as_array().map(Vec::len), Some(3));
    // The unrelated interface fix is held back with the rest
    assert_eq!(fs::read_to_string(temp.path().join("Nested.tsx"))?, source);

    reactlint()?
        .arg(temp.path())
        .arg("--fix")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Rejected Fixes"))
        .stdout(predicate::str::contains("overlap"));
    Ok(())
}

#[test]
fn test_dry_run_leaves_files_alone() -> Result<()> {
    let temp = project(&[("shape.ts", UNSORTED_INTERFACE)])?;

    reactlint()?
        .arg(temp.path())
        .args(["--fix", "--dry-run"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Would fix"));
    assert_eq!(
        fs::read_to_string(temp.path().join("shape.ts"))?,
        UNSORTED_INTERFACE
    );
    Ok(())
}

#[test]
fn test_list_rules() -> Result<()> {
    let mut assert = reactlint()?.arg("--list-rules").assert().success();
    for id in [
        "favor-async-to-new-promises",
        "react-disallow-nil-in-value-props",
        "react-dont-mutate-state",
        "react-sort-jsx-element-attributes",
        "sort-interfaces",
    ] {
        assert = assert.stdout(predicate::str::contains(id));
    }
    Ok(())
}

#[test]
fn test_rules_flag_selects() -> Result<()> {
    let temp = project(&[(
        "a.tsx",
        "interface P { b: string; a: string; }\nclass C { m() { this.state.x = 1; } }\n",
    )])?;

    let json = json_output(
        reactlint()?
            .arg(temp.path())
            .args(["--rules", "react-dont-mutate-state", "--json"]),
    )?;
    assert_eq!(json["findings"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["findings"][0]["ruleId"], "react-dont-mutate-state");
    Ok(())
}

#[test]
fn test_unknown_rule_is_a_configuration_error() -> Result<()> {
    let temp = project(&[("a.ts", "")])?;
    reactlint()?
        .arg(temp.path())
        .args(["--rules", "no-such-rule"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown rule `no-such-rule`"));
    Ok(())
}

#[test]
fn test_type_aware_rule_needs_type_facts() -> Result<()> {
    let temp = project(&[("a.tsx", "")])?;
    reactlint()?
        .arg(temp.path())
        .args(["--rules", "react-disallow-nil-in-value-props"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires type information"));
    Ok(())
}

#[test]
fn test_type_facts_enable_value_prop_rule() -> Result<()> {
    let source = "export const F = ({ name }) => <input value={name} />;\n";
    let temp = project(&[("Form.tsx", source)])?;
    let start = source.find("{name}").unwrap_or_default() + 1;
    let facts = format!(
        r#"{{ "Form.tsx": [{{ "start": {start}, "end": {}, "types": ["string", "undefined"] }}] }}"#,
        start + "name".len()
    );
    let facts_path = temp.path().join("facts.json");
    fs::write(&facts_path, facts)?;

    let json = json_output(
        reactlint()?
            .arg(temp.path().join("Form.tsx"))
            .arg("--type-facts")
            .arg(&facts_path)
            .arg("--json"),
    )?;
    let findings = json["findings"].as_array().cloned().unwrap_or_default();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["ruleId"], "react-disallow-nil-in-value-props");
    assert_eq!(findings[0]["span"]["start"], start);
    Ok(())
}

#[test]
fn test_utf16_type_facts_are_converted() -> Result<()> {
    let source = "const hi = \"héllo 😀\";\nexport const F = ({ name }) => <input value={name} />;\n";
    let temp = project(&[("Form.tsx", source)])?;
    let start = source.find("{name}").unwrap_or_default() + 1;
    let unit_start = source[..start].encode_utf16().count();
    let facts = format!(
        r#"{{ "encoding": "utf16", "files": {{ "Form.tsx": [{{ "start": {unit_start}, "end": {}, "types": ["string", "undefined"] }}] }} }}"#,
        unit_start + "name".len()
    );
    let facts_path = temp.path().join("facts.json");
    fs::write(&facts_path, facts)?;

    let json = json_output(
        reactlint()?
            .arg(temp.path().join("Form.tsx"))
            .arg("--type-facts")
            .arg(&facts_path)
            .arg("--json"),
    )?;
    let findings = json["findings"].as_array().cloned().unwrap_or_default();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["ruleId"], "react-disallow-nil-in-value-props");
    assert_eq!(findings[0]["span"]["start"], start);
    Ok(())
}

#[test]
fn test_semantic_rules_skipped_without_facts() -> Result<()> {
    let temp = project(&[("Form.tsx", "export const F = <input value={name} />;\n")])?;
    reactlint()?.arg(temp.path()).assert().success();
    Ok(())
}

#[test]
fn test_invalid_type_facts_file() -> Result<()> {
    let temp = project(&[("a.ts", ""), ("facts.json", "not json")])?;
    reactlint()?
        .arg(temp.path())
        .arg("--type-facts")
        .arg(temp.path().join("facts.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid type facts"));
    Ok(())
}

#[test]
fn test_suppression_comments() -> Result<()> {
    let source = "class C {\n  m() {\n    // reactlint-disable-next-line react-dont-mutate-state\n    this.state.a = 1;\n    this.state.b = 2; // reactlint-disable-line\n    this.state.c = 3;\n  }\n}\n";
    let temp = project(&[("c.tsx", source)])?;

    let json = json_output(reactlint()?.arg(temp.path()).arg("--json"))?;
    let findings = json["findings"].as_array().cloned().unwrap_or_default();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["line"], 6);
    Ok(())
}

#[test]
fn test_config_file_is_discovered() -> Result<()> {
    let temp = project(&[
        (".reactlint.toml", "[reactlint]\nignore = [\"sort-interfaces\"]\n"),
        ("src/shape.ts", UNSORTED_INTERFACE),
    ])?;
    reactlint()?.arg(temp.path()).assert().success();
    Ok(())
}

#[test]
fn test_package_json_config() -> Result<()> {
    let temp = project(&[
        (
            "package.json",
            r#"{ "name": "app", "reactlint": { "promise_sentinel": "Bluebird" } }"#,
        ),
        (
            "api.ts",
            "function a() { return new Promise(() => {}); }\nfunction b() { return new Bluebird(() => {}); }\n",
        ),
    ])?;
    let json = json_output(reactlint()?.arg(temp.path()).arg("--json"))?;
    let findings = json["findings"].as_array().cloned().unwrap_or_default();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["line"], 2);
    Ok(())
}

#[test]
fn test_explicit_config_errors() -> Result<()> {
    let temp = project(&[
        ("bad.toml", "[reactlint]\nno_such_option = 1\n"),
        ("unknown.toml", "[reactlint]\nrules = [\"made-up\"]\n"),
        ("a.ts", ""),
    ])?;
    reactlint()?
        .arg(temp.path())
        .arg("--config")
        .arg(temp.path().join("bad.toml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid configuration"));
    reactlint()?
        .arg(temp.path())
        .arg("--config")
        .arg(temp.path().join("unknown.toml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("made-up"));
    Ok(())
}

#[test]
fn test_excluded_folders_are_skipped() -> Result<()> {
    let temp = project(&[
        ("node_modules/lib/index.ts", UNSORTED_INTERFACE),
        ("generated/api.ts", UNSORTED_INTERFACE),
        ("src/ok.ts", "export const x = 1;\n"),
    ])?;
    let json = json_output(
        reactlint()?
            .arg(temp.path())
            .args(["--exclude-folders", "generated", "--json"]),
    )?;
    assert_eq!(json["filesAnalyzed"], 1);
    assert_eq!(json["findings"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[test]
fn test_missing_path() -> Result<()> {
    reactlint()?
        .arg(Path::new("definitely/not/here"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
    Ok(())
}

#[test]
fn test_quiet_prints_summary_only() -> Result<()> {
    let temp = project(&[("shape.ts", UNSORTED_INTERFACE)])?;
    reactlint()?
        .arg(temp.path())
        .arg("--quiet")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 problem(s)"))
        .stdout(predicate::str::contains("sort-interfaces").not());
    Ok(())
}
