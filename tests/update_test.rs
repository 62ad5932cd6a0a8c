mod common;

use common::{create_test_dir, read_package_json, snapshot_tree, write_package_json};
use packsmith::project::{update_project, UpdateOptions};
use serde_json::json;
use tokio::fs;

#[tokio::test]
async fn test_empty_project_gets_all_config_files() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .expect("update should succeed");

    for path in [
        ".gitignore",
        ".cursorrules",
        "eslint.config.js",
        "typedoc.json",
        "LICENSE",
        ".vscode/settings.json",
        "tsconfig.json",
        "vite.config.js",
        "scripts/prepublish.js",
        "scripts/postpublish.js",
        ".husky/pre-commit",
        ".github/workflows/publish.yml",
        ".github/workflows/pages.yml",
        ".github/workflows/pull-request.yml",
        ".github/workflows/upload-oss.yml",
        "packsmith.json",
        "test/index.test.ts",
    ] {
        assert!(dir.join(path).exists(), "missing {path}");
    }
}

#[tokio::test]
async fn test_missing_package_json_scaffolds_project() {
    let temp = create_test_dir();
    let dir = temp.path().join("new-project");

    update_project(&UpdateOptions::for_directory(&dir))
        .await
        .expect("update should scaffold a new project");

    let package = read_package_json(&dir).await;
    assert_eq!(package["name"], "@packsmith/new-project");
    assert_eq!(package["version"], "0.0.1");
    assert!(dir.join("src/index.ts").exists());
    assert!(dir.join(".gitignore").exists());
    assert!(dir.join("tsconfig.json").exists());
}

#[tokio::test]
async fn test_standard_scripts_added() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({ "scripts": {} })).await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let package = read_package_json(dir).await;
    let scripts = &package["scripts"];
    assert_eq!(scripts["clean"], "rimraf lib dist public");
    assert_eq!(scripts["build"], "vite build && tsc");
    assert_eq!(scripts["test"], "vitest run");
    assert_eq!(scripts["lint"], "eslint .");
    assert_eq!(scripts["docs"], "typedoc");
    assert!(scripts["prepublishOnly"].is_string());
    assert!(scripts["postpublish"].is_string());
    assert!(scripts["release"].is_string());
}

#[tokio::test]
async fn test_existing_scripts_are_not_replaced() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(
        dir,
        json!({
            "scripts": {
                "build": "custom build command",
                "test": "custom test command",
            }
        }),
    )
    .await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let package = read_package_json(dir).await;
    assert_eq!(package["scripts"]["build"], "custom build command");
    assert_eq!(package["scripts"]["test"], "custom test command");
    assert_eq!(package["scripts"]["clean"], "rimraf lib dist public");
}

#[tokio::test]
async fn test_dev_dependencies_added() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let package = read_package_json(dir).await;
    let deps = &package["devDependencies"];
    for tool in ["typescript", "vite", "vitest", "eslint", "typedoc"] {
        assert!(deps[tool].is_string(), "missing devDependency {tool}");
    }
}

#[tokio::test]
async fn test_entry_points_added_only_when_absent() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let package = read_package_json(dir).await;
    assert_eq!(package["type"], "module");
    assert_eq!(package["main"], "./src/index.ts");
    assert_eq!(package["module"], "./src/index.ts");
    assert_eq!(package["types"], "./src/index.ts");
    assert!(package["exports"].is_object());
}

#[tokio::test]
async fn test_existing_entry_points_preserved() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(
        dir,
        json!({
            "type": "commonjs",
            "main": "./lib/index.js",
            "types": "./lib/index.d.ts",
            "exports": { ".": "./lib/index.js" },
        }),
    )
    .await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let package = read_package_json(dir).await;
    assert_eq!(package["type"], "commonjs");
    assert_eq!(package["main"], "./lib/index.js");
    assert_eq!(package["types"], "./lib/index.d.ts");
    assert_eq!(package["exports"], json!({ ".": "./lib/index.js" }));
}

#[tokio::test]
async fn test_custom_gitignore_is_untouched() {
    let temp = create_test_dir();
    let dir = temp.path();
    let custom = "# Custom gitignore\nnode_modules/\n";
    write_package_json(dir, json!({})).await;
    fs::write(dir.join(".gitignore"), custom).await.unwrap();

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    // Only the generated-file block may be appended; the custom part stays
    let content = fs::read_to_string(dir.join(".gitignore")).await.unwrap();
    assert!(content.starts_with("# Custom gitignore\nnode_modules/"));
}

#[tokio::test]
async fn test_custom_license_is_untouched() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;
    fs::write(dir.join("LICENSE"), "Custom License Content")
        .await
        .unwrap();

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let content = fs::read_to_string(dir.join("LICENSE")).await.unwrap();
    assert_eq!(content, "Custom License Content");
}

#[tokio::test]
async fn test_existing_tsconfig_and_vite_config_preserved() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;
    fs::write(
        dir.join("tsconfig.json"),
        r#"{"compilerOptions": {"target": "ES5"}}"#,
    )
    .await
    .unwrap();
    fs::write(dir.join("vite.config.js"), "// Custom config")
        .await
        .unwrap();

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let tsconfig = fs::read_to_string(dir.join("tsconfig.json")).await.unwrap();
    assert_eq!(tsconfig, r#"{"compilerOptions": {"target": "ES5"}}"#);
    let vite = fs::read_to_string(dir.join("vite.config.js")).await.unwrap();
    assert_eq!(vite, "// Custom config");
}

#[tokio::test]
async fn test_existing_publish_scripts_preserved() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;
    fs::create_dir_all(dir.join("scripts")).await.unwrap();
    fs::write(dir.join("scripts/prepublish.js"), "// Custom prepublish")
        .await
        .unwrap();

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let content = fs::read_to_string(dir.join("scripts/prepublish.js"))
        .await
        .unwrap();
    assert_eq!(content, "// Custom prepublish");
    assert!(dir.join("scripts/postpublish.js").exists());
}

#[tokio::test]
async fn test_husky_wiring() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let hook = fs::read_to_string(dir.join(".husky/pre-commit"))
        .await
        .unwrap();
    assert!(hook.contains("lint-staged"));

    let package = read_package_json(dir).await;
    assert!(package["lint-staged"].is_object());
    assert_eq!(package["scripts"]["prepare"], "husky");
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();
    let first = snapshot_tree(dir);

    let summary = update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();
    let second = snapshot_tree(dir);

    assert_eq!(first, second);
    assert!(!summary.manifest_written);
    assert!(summary.report.created.is_empty());
    assert!(summary.report.updated.is_empty());
}

#[tokio::test]
async fn test_generated_files_are_ignore_listed() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let gitignore = fs::read_to_string(dir.join(".gitignore")).await.unwrap();
    for path in [
        ".cursorrules",
        "eslint.config.js",
        "typedoc.json",
        ".github/workflows/publish.yml",
        "packsmith.json",
    ] {
        assert!(
            gitignore.lines().any(|line| line == path),
            "{path} should be ignore-listed"
        );
    }
}

#[tokio::test]
async fn test_customized_generated_file_leaves_ignore_list() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    // User removes the ignore entry before customizing the file
    let gitignore = fs::read_to_string(dir.join(".gitignore")).await.unwrap();
    let without_entry: String = gitignore
        .lines()
        .filter(|line| *line != "eslint.config.js")
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(dir.join(".gitignore"), without_entry)
        .await
        .unwrap();
    fs::write(dir.join("eslint.config.js"), "export default [];\n")
        .await
        .unwrap();

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    let content = fs::read_to_string(dir.join("eslint.config.js"))
        .await
        .unwrap();
    assert_eq!(content, "export default [];\n");

    let gitignore = fs::read_to_string(dir.join(".gitignore")).await.unwrap();
    assert!(!gitignore.lines().any(|line| line == "eslint.config.js"));
}

#[tokio::test]
async fn test_scoped_update_still_sweeps_all_ignore_entries() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;

    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();

    // Customize a file outside the scoped group while it is still listed
    fs::write(dir.join(".cursorrules"), "my own rules\n")
        .await
        .unwrap();

    let options = UpdateOptions {
        eslint: true,
        ..UpdateOptions::for_directory(dir)
    };
    update_project(&options).await.unwrap();

    // A scoped run must not leave a stale entry: the file diverged from
    // its template, so its ignore line goes away even though the run
    // never touched the cursorrules group
    let gitignore = fs::read_to_string(dir.join(".gitignore")).await.unwrap();
    assert!(!gitignore.lines().any(|line| line == ".cursorrules"));

    let content = fs::read_to_string(dir.join(".cursorrules")).await.unwrap();
    assert_eq!(content, "my own rules\n");

    // The next full run now sees an unlisted customized file and keeps it
    update_project(&UpdateOptions::for_directory(dir))
        .await
        .unwrap();
    let content = fs::read_to_string(dir.join(".cursorrules")).await.unwrap();
    assert_eq!(content, "my own rules\n");
}

#[tokio::test]
async fn test_single_group_flag_limits_scope() {
    let temp = create_test_dir();
    let dir = temp.path();
    write_package_json(dir, json!({})).await;

    let options = UpdateOptions {
        eslint: true,
        ..UpdateOptions::for_directory(dir)
    };
    update_project(&options).await.unwrap();

    assert!(dir.join("eslint.config.js").exists());
    assert!(!dir.join("LICENSE").exists());
    assert!(!dir.join(".github/workflows/publish.yml").exists());
}
