//! Integration tests for platform selection and URL opening.

mod helpers;

use std::sync::Arc;

use helpers::LaunchOutcome;

use manifold_core::error::ErrorKind;
use manifold_core::priority::Priority;
use manifold_core::result::RuntimeResult;
use manifold_core::traits::PlatformHandler;
use manifold_platform::{FallbackPlatform, select_platform};
use manifold_plugin::descriptor::{Capability, PluginDescriptor, PluginInstance};

#[tokio::test]
async fn test_fallback_succeeds_on_second_candidate_and_stops() {
    let runtime = helpers::TestRuntime::new(
        &["a", "b", "c"],
        &[
            ("a", LaunchOutcome::LaunchError),
            ("b", LaunchOutcome::Exit(0)),
            ("c", LaunchOutcome::Exit(0)),
        ],
    )
    .await;

    let platform = select_platform(&runtime.index, &runtime.instantiator)
        .await
        .unwrap();
    assert_eq!(platform.name(), FallbackPlatform::NAME);

    platform.open("https://example.org").await.unwrap();

    assert_eq!(runtime.launcher.attempts(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_fallback_reports_unreachable_target_when_all_candidates_fail() {
    let runtime = helpers::TestRuntime::new(
        &["a", "b", "c"],
        &[
            ("a", LaunchOutcome::LaunchError),
            ("b", LaunchOutcome::Exit(2)),
            ("c", LaunchOutcome::LaunchError),
        ],
    )
    .await;

    let platform = select_platform(&runtime.index, &runtime.instantiator)
        .await
        .unwrap();
    let err = platform.open("https://example.org/doc").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::UnreachableTarget);
    assert!(err.message.contains("https://example.org/doc"));
    assert_eq!(runtime.launcher.attempts(), vec!["a", "b", "c"]);
}

#[derive(Debug)]
struct RecordingPlatform;

#[async_trait::async_trait]
impl PlatformHandler for RecordingPlatform {
    fn name(&self) -> &str {
        "recording"
    }

    async fn open(&self, _url: &str) -> RuntimeResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_applicable_specific_handler_preempts_fallback() {
    let runtime = helpers::TestRuntime::new(&["a"], &[]).await;

    runtime
        .index
        .register(
            PluginDescriptor::new(
                Capability::PlatformHandler,
                "recording",
                Priority::NORMAL,
                |_| Ok(PluginInstance::Platform(Arc::new(RecordingPlatform))),
            )
            .with_applies(|| true),
        )
        .await
        .unwrap();

    let platform = select_platform(&runtime.index, &runtime.instantiator)
        .await
        .unwrap();
    assert_eq!(platform.name(), "recording");

    // Opening through the specific handler never probes the fallback list.
    platform.open("https://example.org").await.unwrap();
    assert!(runtime.launcher.attempts().is_empty());
}

#[tokio::test]
async fn test_selection_never_comes_up_empty_with_builtins() {
    let runtime = helpers::TestRuntime::new(&["a"], &[]).await;

    let platform = select_platform(&runtime.index, &runtime.instantiator)
        .await
        .unwrap();
    assert!(!platform.name().is_empty());
}
