//! Traversal tests for DependencyWalker.

use super::test_helpers::*;
use crate::runtime::test_utils::TestRuntime;
use crate::walker::{DependencyWalker, WalkerError};
use prodex_config::ProdexConfig;
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_alias_and_relative_scenario() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            (
                "main.ts",
                "import { u } from './util';\nimport { x } from '@lib/x';\nimport React from 'react';\n",
            ),
            ("util.ts", "export const u = 1;"),
            ("lib/x.ts", "export const x = 2;"),
        ],
    );

    let mut config = bare_config(&root);
    config
        .resolve
        .aliases
        .insert("@lib".to_string(), "lib".to_string());

    let (result, _) = trace(&config, &["main.ts"]).await;

    assert_eq!(relative(&root, &result.files), vec!["main.ts", "util.ts", "lib/x.ts"]);
    assert_eq!(result.stats.expected, set(&["./util", "@lib/x"]));
    assert_eq!(result.stats.resolved, set(&["./util", "@lib/x"]));
    assert!(!result.truncated);
}

#[tokio::test]
async fn test_cycle_emits_each_file_once() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("a.ts", "import { b } from './b';\nexport const a = 1;"),
            ("b.ts", "import { a } from './a';\nexport const b = 2;"),
        ],
    );

    let (result, runtime) = trace(&bare_config(&root), &["a.ts"]).await;

    assert_eq!(relative(&root, &result.files), vec!["a.ts", "b.ts"]);
    assert_eq!(result.stats.resolved, set(&["./a", "./b"]));
    assert_eq!(runtime.reads_of(&root.join("a.ts")), 1);
    assert_eq!(runtime.reads_of(&root.join("b.ts")), 1);
}

#[tokio::test]
async fn test_depth_zero_emits_direct_imports_only() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("a.ts", "import './b';"),
            ("b.ts", "import './c';"),
            ("c.ts", "export {};"),
        ],
    );

    let mut config = bare_config(&root);
    config.resolve.depth = 0;
    let (result, runtime) = trace(&config, &["a.ts"]).await;

    assert_eq!(relative(&root, &result.files), vec!["a.ts", "b.ts"]);
    assert_eq!(result.stats.expected, set(&["./b"]));
    assert_eq!(runtime.reads_of(&root.join("b.ts")), 0);

    config.resolve.depth = 1;
    let (result, _) = trace(&config, &["a.ts"]).await;
    assert_eq!(relative(&root, &result.files), vec!["a.ts", "b.ts", "c.ts"]);
}

#[tokio::test]
async fn test_depth_cutoff_still_marks_visited() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("a.ts", "import './b';"),
            ("b.ts", "import './c';"),
            ("c.ts", "export {};"),
        ],
    );

    let mut config = bare_config(&root);
    config.resolve.depth = 0;
    let (result, runtime) = trace(&config, &["a.ts", "b.ts"]).await;

    assert_eq!(relative(&root, &result.files), vec!["a.ts", "b.ts"]);
    assert_eq!(runtime.reads_of(&root.join("b.ts")), 0);
}

#[tokio::test]
async fn test_excluded_specifiers_are_dropped_entirely() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            (
                "src/main.ts",
                "import './legacy/old';\nimport './generated/api';\nimport './ok';\n",
            ),
            ("src/legacy/old.ts", "export {};"),
            ("src/generated/api.ts", "export {};"),
            ("src/ok.ts", "export {};"),
        ],
    );

    let mut config = bare_config(&root);
    config.resolve.exclude = vec!["legacy/**".to_string(), "src/generated/**".to_string()];
    let (result, _) = trace(&config, &["src/main.ts"]).await;

    assert_eq!(relative(&root, &result.files), vec!["src/main.ts", "src/ok.ts"]);
    assert_eq!(result.stats.expected, set(&["./ok"]));
    assert_eq!(result.stats.resolved, set(&["./ok"]));
}

#[tokio::test]
async fn test_default_excludes_drop_ui_components() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            (
                "src/main.tsx",
                "import { Button } from '@/components/ui/button';\nimport { Nav } from '@/components/Nav';\n",
            ),
            ("src/components/ui/button.tsx", "export const Button = 1;"),
            ("src/components/Nav.tsx", "export const Nav = 1;"),
        ],
    );

    let mut config = ProdexConfig::with_root(&root);
    config
        .resolve
        .aliases
        .insert("@".to_string(), "src".to_string());
    let (result, _) = trace(&config, &["src/main.tsx"]).await;

    assert_eq!(
        relative(&root, &result.files),
        vec!["src/main.tsx", "src/components/Nav.tsx"]
    );
    assert_eq!(result.stats.expected, set(&["@/components/Nav"]));
}

#[tokio::test]
async fn test_size_limit_truncates_output() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            (
                "main.ts",
                "import './a';\nimport './b';\nimport './c';\nimport './e';\nimport './f';\n",
            ),
            ("a.ts", ""),
            ("b.ts", ""),
            ("c.ts", ""),
            ("e.ts", ""),
            ("f.ts", ""),
        ],
    );

    let mut config = bare_config(&root);
    config.resolve.limit = 3;
    let (result, _) = trace(&config, &["main.ts"]).await;

    assert_eq!(result.files.len(), 3);
    assert!(result.truncated);

    config.resolve.limit = 0;
    let (result, _) = trace(&config, &["main.ts"]).await;
    assert_eq!(result.files.len(), 6);
    assert!(!result.truncated);
}

#[tokio::test]
async fn test_limit_stops_before_later_entries() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("a.ts", "import './b';"),
            ("b.ts", ""),
            ("c.ts", "import './d';"),
            ("d.ts", ""),
        ],
    );

    let mut config = bare_config(&root);
    config.resolve.limit = 2;
    let (result, runtime) = trace(&config, &["a.ts", "c.ts"]).await;

    assert_eq!(relative(&root, &result.files), vec!["a.ts", "b.ts"]);
    assert!(result.truncated);
    assert_eq!(runtime.reads_of(&root.join("c.ts")), 0);
}

#[tokio::test]
async fn test_limit_equal_to_graph_size_is_not_truncated() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[("a.ts", "import './b';"), ("b.ts", "import './a';")],
    );

    let mut config = bare_config(&root);
    config.resolve.limit = 2;
    let (result, _) = trace(&config, &["a.ts", "b.ts"]).await;

    assert_eq!(relative(&root, &result.files), vec!["a.ts", "b.ts"]);
    assert!(!result.truncated);
}

#[tokio::test]
async fn test_runs_are_idempotent() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("main.ts", "import './a';\nimport './missing';\nrequire('./b');"),
            ("a.ts", "import './b';\nexport * from './c';"),
            ("b.ts", "import('./a');"),
            ("c.ts", ""),
        ],
    );

    let config = bare_config(&root);
    let (first, _) = trace(&config, &["main.ts"]).await;
    let (second, _) = trace(&config, &["main.ts"]).await;

    assert_eq!(first, second);
    assert!(first.stats.resolved.is_subset(&first.stats.expected));
    assert_eq!(first.stats.missing().into_iter().collect::<Vec<_>>(), vec!["./missing"]);
}

#[tokio::test]
async fn test_declaration_files_are_leaves() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("main.ts", "import type { T } from './types';"),
            ("types.d.ts", "import './hidden';\nexport type T = string;"),
            ("hidden.ts", "export {};"),
        ],
    );

    let (result, runtime) = trace(&bare_config(&root), &["main.ts"]).await;

    assert_eq!(relative(&root, &result.files), vec!["main.ts", "types.d.ts"]);
    assert_eq!(runtime.reads_of(&root.join("types.d.ts")), 0);
}

#[tokio::test]
async fn test_unresolved_specifiers_stay_expected() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(&temp, &[("main.ts", "import './nope';\nimport 'lodash';")]);

    let (result, _) = trace(&bare_config(&root), &["main.ts"]).await;

    assert_eq!(relative(&root, &result.files), vec!["main.ts"]);
    assert_eq!(result.stats.expected, set(&["./nope"]));
    assert!(result.stats.resolved.is_empty());
    assert_eq!(result.stats.missing_count(), 1);
}

#[tokio::test]
async fn test_probes_are_memoised_per_run() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("a.ts", "import './shared';\nimport './b';"),
            ("b.ts", "import './shared';"),
            ("shared.ts", "export {};"),
        ],
    );

    let (result, runtime) = trace(&bare_config(&root), &["a.ts"]).await;

    assert_eq!(relative(&root, &result.files), vec!["a.ts", "b.ts", "shared.ts"]);
    assert_eq!(runtime.stats_of(&root.join("shared.ts")), 1);
    assert_eq!(runtime.reads_of(&root.join("shared.ts")), 1);
    assert_eq!(runtime.reads_of(&root.join("a.ts")), 1);
}

#[tokio::test]
async fn test_visited_entries_are_skipped() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[("a.ts", "import './b';"), ("b.ts", "export {};")],
    );

    let (result, _) = trace(&bare_config(&root), &["a.ts", "b.ts"]).await;
    assert_eq!(relative(&root, &result.files), vec!["a.ts", "b.ts"]);
}

#[tokio::test]
async fn test_non_code_entries_are_emitted() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[("README.md", "import './a';"), ("main.ts", ""), ("a.ts", "")],
    );

    let (result, _) = trace(&bare_config(&root), &["README.md", "main.ts"]).await;
    assert_eq!(relative(&root, &result.files), vec!["README.md", "main.ts"]);
    assert!(result.stats.is_empty());
}

#[tokio::test]
async fn test_stats_union_across_entries() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[("a.ts", "import './x';"), ("b.ts", "import './y';\nimport './a';")],
    );

    let (result, _) = trace(&bare_config(&root), &["a.ts", "b.ts"]).await;
    assert_eq!(result.stats.expected, set(&["./a", "./x", "./y"]));
    assert_eq!(result.stats.resolved, set(&["./a"]));
}

#[tokio::test]
async fn test_no_entries_is_fatal() {
    let temp = TempDir::new().unwrap();
    let config = bare_config(temp.path());
    let runtime = TestRuntime::new(config.root.clone());

    let err = DependencyWalker::new(config)
        .follow_chain(&[], &runtime)
        .await
        .unwrap_err();
    assert!(matches!(err, WalkerError::NoEntries));
}

#[tokio::test]
async fn test_invalid_exclude_is_fatal_before_traversal() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(&temp, &[("main.ts", "")]);
    let mut config = bare_config(&root);
    config.resolve.exclude = vec!["src/[".to_string()];
    let runtime = TestRuntime::new(root.clone());

    let err = DependencyWalker::new(config)
        .follow_chain(&[PathBuf::from("main.ts")], &runtime)
        .await
        .unwrap_err();
    assert!(matches!(err, WalkerError::InvalidPattern(_)));
    assert_eq!(runtime.total_reads(), 0);
}

#[tokio::test]
async fn test_resolve_imports_excludes_the_file_itself() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[("a.ts", "import './b';"), ("b.ts", "import './c';"), ("c.ts", "")],
    );

    let walker = DependencyWalker::new(bare_config(&root));
    let ctx = walker.context().unwrap();
    let runtime = TestRuntime::new(root.clone());

    let result = walker
        .resolve_js_imports(&root.join("a.ts"), 0, 10, &ctx, &runtime)
        .await;
    assert_eq!(relative(&root, &result.files), vec!["b.ts", "c.ts"]);
    assert!(ctx.is_visited(&root.join("a.ts")));

    // Same context: a visited file contributes nothing.
    let again = walker
        .resolve_imports(&root.join("a.ts"), 0, 10, &ctx, &runtime)
        .await;
    assert!(again.files.is_empty());

    let wrong_family = walker
        .resolve_php_imports(&root.join("b.ts"), 0, 10, &ctx, &runtime)
        .await;
    assert!(wrong_family.files.is_empty());
}

#[tokio::test]
async fn test_php_binding_redirects_to_concrete() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("composer.json", r#"{"autoload":{"psr-4":{"App\\":"app/"}}}"#),
            (
                "app/Providers/AppServiceProvider.php",
                r#"<?php
namespace App\Providers;

use App\Contracts\PaymentGateway;
use App\Services\StripeGateway;

class AppServiceProvider
{
    public function register(): void
    {
        $this->app->bind(PaymentGateway::class, StripeGateway::class);
    }
}
"#,
            ),
            (
                "app/Services/StripeGateway.php",
                "<?php\nnamespace App\\Services;\nclass StripeGateway {}\n",
            ),
            (
                "app/Http/Controllers/CheckoutController.php",
                "<?php\nnamespace App\\Http\\Controllers;\nuse App\\Contracts\\PaymentGateway;\nuse Illuminate\\Http\\Request;\n",
            ),
        ],
    );

    let (result, _) = trace(
        &bare_config(&root),
        &["app/Http/Controllers/CheckoutController.php"],
    )
    .await;

    assert_eq!(
        relative(&root, &result.files),
        vec![
            "app/Http/Controllers/CheckoutController.php",
            "app/Services/StripeGateway.php"
        ]
    );
    assert_eq!(result.stats.expected, set(&["App\\Services\\StripeGateway"]));
    assert_eq!(result.stats.resolved, set(&["App\\Services\\StripeGateway"]));
}

#[tokio::test]
async fn test_php_grouped_use_resolves_each_member() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("composer.json", r#"{"autoload":{"psr-4":{"App\\":"app/"}}}"#),
            (
                "app/Http/PostController.php",
                "<?php\nnamespace App\\Http;\nuse App\\Models\\{User, Post};\n",
            ),
            ("app/Models/User.php", "<?php class User {}"),
            ("app/Models/Post.php", "<?php class Post {}"),
        ],
    );

    let (result, _) = trace(&bare_config(&root), &["app/Http/PostController.php"]).await;

    assert_eq!(
        relative(&root, &result.files),
        vec![
            "app/Http/PostController.php",
            "app/Models/Post.php",
            "app/Models/User.php"
        ]
    );
    assert_eq!(
        result.stats.resolved,
        set(&["App\\Models\\Post", "App\\Models\\User"])
    );
}

#[tokio::test]
async fn test_php_includes_resolve_relative_to_file() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("public/index.php", "<?php\nrequire_once '../bootstrap/app.php';\n"),
            ("bootstrap/app.php", "<?php\ninclude 'helpers.php';\n"),
            ("bootstrap/helpers.php", "<?php\n"),
        ],
    );

    let (result, _) = trace(&bare_config(&root), &["public/index.php"]).await;

    assert_eq!(
        relative(&root, &result.files),
        vec!["public/index.php", "bootstrap/app.php", "bootstrap/helpers.php"]
    );
    assert_eq!(result.stats.resolved, set(&["../bootstrap/app.php", "helpers.php"]));
}
