use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const POD_CS: &str = "using System;\nclass Pod {\n    string title = \"Command Pod\";\n}\n";
const POD_CFG: &str =
    "PART\n{\n    name = pod\n    title = Command Pod\n    description = Seats one.\n}\n";

fn pod_project() -> Result<CliTest> {
    let test = CliTest::with_file("Source/Pod.cs", POD_CS)?;
    test.write_file("Parts/pod.cfg", POD_CFG)?;
    Ok(test)
}

#[test]
fn test_dry_run_previews_and_writes_nothing() -> Result<()> {
    let test = pod_project()?;

    let output = test.extract_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("--> Source/Pod.cs:3:"));
    assert!(out.contains("Localizer.Format(\"#MyMod_Command_Pod\")"));
    assert!(out.contains("--> Parts/pod.cfg:4:"));
    assert!(out.contains("C# files: 1 scanned, 1 modified, 1 new key"));
    assert!(out.contains("cfg files: 1 scanned, 1 modified, 1 new key"));
    assert!(out.contains("Would update 2 files with 2 new keys."));
    assert!(out.contains("Run with --apply"));

    assert_eq!(test.read_file("Source/Pod.cs")?, POD_CS);
    assert_eq!(test.read_file("Parts/pod.cfg")?, POD_CFG);
    assert!(!test.exists("Source/Pod.cs.bak"));
    assert!(!test.exists("Localization"));

    Ok(())
}

#[test]
fn test_apply_rewrites_files_and_writes_catalog() -> Result<()> {
    let test = pod_project()?;

    let output = test.extract_command().arg("--apply").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Updated 2 files with 2 new keys."));

    assert_eq!(
        test.read_file("Source/Pod.cs")?,
        "using KSP.Localization;\nusing System;\nclass Pod {\n    string title = Localizer.Format(\"#MyMod_Command_Pod\");\n}\n"
    );
    assert_eq!(
        test.read_file("Parts/pod.cfg")?,
        "PART\n{\n    name = pod\n    title = #MyMod_Command_Pod\n    description = #MyMod_Seats_one\n}\n"
    );
    assert_eq!(test.read_file("Source/Pod.cs.bak")?, POD_CS);
    assert_eq!(test.read_file("Parts/pod.cfg.bak")?, POD_CFG);

    assert_eq!(
        test.read_file("Localization/en-us.cfg")?,
        concat!(
            "// Autogenerated by ksploc\n",
            "Localization\n",
            "{\n",
            "    en-us\n",
            "    {\n",
            "        #MyMod_Command_Pod = Command Pod\n",
            "        #MyMod_Seats_one = Seats one.\n",
            "    }\n",
            "}\n",
        )
    );
    let csv = test.read_file("Localization/en-us.csv")?;
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        vec![
            r#""Key","Text""#,
            r#""MyMod_Command_Pod","Command Pod""#,
            r#""MyMod_Seats_one","Seats one.""#,
        ]
    );

    Ok(())
}

#[test]
fn test_second_run_has_nothing_to_do() -> Result<()> {
    let test = pod_project()?;
    test.extract_command().arg("--apply").output()?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Reused 2 keys from the existing catalog"));
    assert!(out.contains("nothing to localize"));

    Ok(())
}

#[test]
fn test_cli_flags_override_config_file() -> Result<()> {
    let test = pod_project()?;
    test.write_file(".ksplocrc.json", r#"{ "prefix": "FromFile", "codeOnly": true }"#)?;

    let output = test
        .extract_command()
        .args(["--prefix", "Pods", "--numeric-tags", "--apply"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert!(test.read_file("Source/Pod.cs")?.contains("Localizer.Format(\"#Pods_1\")"));
    // codeOnly from the file still applies.
    assert_eq!(test.read_file("Parts/pod.cfg")?, POD_CFG);
    assert!(
        test.read_file("Localization/en-us.cfg")?
            .contains("        #Pods_1 = Command Pod\n")
    );

    Ok(())
}

#[test]
fn test_separate_catalogs_and_out_dir() -> Result<()> {
    let test = pod_project()?;

    let output = test
        .extract_command()
        .args(["--separate-parts-cfg", "--out-dir", "GameData/Loc", "--apply"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let code_catalog = test.read_file("GameData/Loc/en-us-cs.cfg")?;
    let cfg_catalog = test.read_file("GameData/Loc/en-us-cfg.cfg")?;
    assert!(code_catalog.contains("#MyMod_Command_Pod = Command Pod"));
    assert!(!code_catalog.contains("Seats one."));
    // The shared title belongs to the group that saw it first.
    assert!(!cfg_catalog.contains("Command Pod"));
    assert!(cfg_catalog.contains("#MyMod_Seats_one = Seats one."));
    assert!(test.exists("GameData/Loc/en-us.csv"));
    assert!(!test.exists("Localization"));

    Ok(())
}

#[test]
fn test_explicit_config_file() -> Result<()> {
    let test = pod_project()?;
    test.write_file("ksploc.json", r#"{ "prefix": "Explicit", "cfgOnly": true }"#)?;

    let output = test
        .extract_command()
        .args(["--config", "ksploc.json", "--apply"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert_eq!(test.read_file("Source/Pod.cs")?, POD_CS);
    assert!(
        test.read_file("Parts/pod.cfg")?
            .contains("title = #Explicit_Command_Pod")
    );

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = pod_project()?;
    test.write_file(".ksplocrc.json", r#"{ "excludeStrings": ["("] }"#)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("excludeStrings"));

    Ok(())
}

#[test]
fn test_verbose_lists_files() -> Result<()> {
    let test = pod_project()?;

    let output = test.extract_command().args(["-v", "--apply"]).output()?;
    let out = stdout(&output);
    assert!(out.contains("Updated Source/Pod.cs (1 line), backup created"));
    assert!(out.contains("Updated Parts/pod.cfg (2 lines), backup created"));
    assert!(stderr(&output).contains("no config file found"));

    Ok(())
}

#[test]
fn test_prefix_must_be_an_identifier() -> Result<()> {
    let test = pod_project()?;

    let output = test
        .extract_command()
        .args(["--prefix", "My-Mod", "--apply"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("'prefix'"));
    assert_eq!(test.read_file("Source/Pod.cs")?, POD_CS);

    Ok(())
}
