use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, ENRICHED_BLOCK, PENDING_CLIENT, stdout, summary_line};

#[test]
fn test_fix_rewrites_pending_block() -> Result<()> {
    let test = CliTest::with_file("src/Client/RagClient.php", PENDING_CLIENT)?;

    let output = test.fix_command().output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let out = stdout(&output);
    assert!(out.contains("Processing src/Client/RagClient.php...\n  ✓ Updated successfully\n"));
    assert_snapshot!(summary_line(&output), @"Updated 1/1 files");

    let content = test.read_file("src/Client/RagClient.php")?;
    assert!(content.contains(ENRICHED_BLOCK), "got:\n{}", content);
    assert!(content.starts_with("<?php\n\nnamespace App\\Client;\n"));
    Ok(())
}

#[test]
fn test_fix_second_run_is_noop() -> Result<()> {
    let test = CliTest::with_file("src/Client/RagClient.php", PENDING_CLIENT)?;

    test.fix_command().output()?;
    let first = test.read_file("src/Client/RagClient.php")?;

    let output = test.fix_command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("  ✓ Already fully updated\n"));
    assert_snapshot!(summary_line(&output), @"Updated 0/1 files");
    assert_eq!(test.read_file("src/Client/RagClient.php")?, first);
    Ok(())
}

#[test]
fn test_fix_dry_run_does_not_write() -> Result<()> {
    let test = CliTest::with_file("src/Client/RagClient.php", PENDING_CLIENT)?;

    let output = test.fix_command().arg("--dry-run").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("  Would update 1 block\n"));
    assert_snapshot!(summary_line(&output), @"Would update 1/1 files");
    assert_eq!(test.read_file("src/Client/RagClient.php")?, PENDING_CLIENT);
    Ok(())
}

#[test]
fn test_fix_leaves_non_literal_description() -> Result<()> {
    let source = PENDING_CLIENT.replace("'Unable to fetch: '", "$this->describe($id)");
    let test = CliTest::with_file("src/Client/RagClient.php", &source)?;

    let output = test.fix_command().output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("  ✘ No changes made\n"));
    assert!(out.contains("  - skipped: 1 block without a literal description\n"));
    assert_eq!(test.read_file("src/Client/RagClient.php")?, source);
    Ok(())
}

#[test]
fn test_fix_partial_file_reports_pending_count() -> Result<()> {
    let test = CliTest::with_file("src/Client/RagClient.php", PENDING_CLIENT)?;
    test.fix_command().output()?;
    let migrated = test.read_file("src/Client/RagClient.php")?;
    test.write_file(
        "src/Client/RagClient.php",
        &format!("{}\n{}", migrated, PENDING_CLIENT),
    )?;

    let output = test.fix_command().output()?;

    let out = stdout(&output);
    assert!(out.contains("  Found 1 catch block still needing update\n"));
    assert!(out.contains("  ✓ Updated successfully\n"));

    let content = test.read_file("src/Client/RagClient.php")?;
    assert_eq!(content.matches("$errorData = $this->extractErrorData($e);").count(), 2);
    Ok(())
}

#[test]
fn test_fix_explicit_paths_and_missing_file() -> Result<()> {
    let test = CliTest::with_file("src/Client/RagClient.php", PENDING_CLIENT)?;
    test.write_file("src/Client/AdminClient.php", PENDING_CLIENT)?;

    let output = test
        .fix_command()
        .arg("src/Client/AdminClient.php")
        .arg("src/Client/Missing.php")
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let out = stdout(&output);
    assert!(out.contains("Processing src/Client/Missing.php...\n  ✘ Error: Failed to read file:"));
    assert_snapshot!(summary_line(&output), @"Updated 1/2 files");

    // Only the explicitly named file is touched.
    assert!(test.read_file("src/Client/AdminClient.php")?.contains(ENRICHED_BLOCK));
    assert_eq!(test.read_file("src/Client/RagClient.php")?, PENDING_CLIENT);
    Ok(())
}

#[test]
fn test_fix_uses_config_idiom() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".catchfixrc.json",
        r#"{
            "files": ["lib/BillingClient.php"],
            "includes": [],
            "idiom": { "domainException": "BillingException" }
        }"#,
    )?;
    test.write_file(
        "lib/BillingClient.php",
        &PENDING_CLIENT.replace("RagApiException", "BillingException"),
    )?;

    let output = test.fix_command().output()?;

    assert!(output.status.success());
    let content = test.read_file("lib/BillingClient.php")?;
    assert!(content.contains("throw new BillingException(\n"));
    assert!(content.contains("'Unable to fetch: ' . $errorMessage,"));
    Ok(())
}

#[test]
fn test_fix_from_subdirectory_finds_project_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".catchfixrc.json",
        r#"{ "idiom": { "domainException": "BillingException" } }"#,
    )?;
    test.write_file(
        "app/Client.php",
        &PENDING_CLIENT.replace("RagApiException", "BillingException"),
    )?;

    let output = test
        .fix_command()
        .current_dir(test.root().join("app"))
        .args(["-v", "Client.php"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let note = format!("Note: Using {}", test.root().join(".catchfixrc.json").display());
    assert!(stderr.contains(&note), "stderr: {}", stderr);
    assert!(stdout(&output).contains("Processing app/Client.php...\n  ✓ Updated successfully\n"));
    assert_snapshot!(summary_line(&output), @"Updated 1/1 files");

    let content = test.read_file("app/Client.php")?;
    assert!(content.contains("throw new BillingException(\n"));
    Ok(())
}

#[test]
fn test_fix_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".catchfixrc.json", r#"{ "idiom": { "dataHelper": "" } }"#)?;

    let output = test.fix_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("idiom.dataHelper"), "stderr: {}", stderr);
    Ok(())
}

#[test]
fn test_fix_skips_vendor_directory() -> Result<()> {
    let test = CliTest::with_file("src/vendor/acme/Client.php", PENDING_CLIENT)?;
    test.write_file("src/Client/RagClient.php", PENDING_CLIENT)?;

    let output = test.fix_command().output()?;

    assert!(output.status.success());
    assert_snapshot!(summary_line(&output), @"Updated 1/1 files");
    assert_eq!(test.read_file("src/vendor/acme/Client.php")?, PENDING_CLIENT);
    assert!(test.root().join("src/Client/RagClient.php").exists());
    Ok(())
}
