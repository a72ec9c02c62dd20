//! End-to-end bootstrap scenarios against a scripted host.

mod common;

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::mpsc;

use toolframe::{
    AppConnection, BackendCall, Bootstrap, BootstrapOutcome, FrameError, Phase, RenderInfo,
    SingleView,
};
use toolframe_protocol::{HostRequest, QueryError, UnsignedCall, ViewScope};
use toolframe_rpc::testing::ScriptedHost;
use toolframe_rpc::InboundCall;

use common::{cross_config, single_config, FakeConnector, LOCATION, TOOL_A, TOOL_B};

fn bootstrap(host: &ScriptedHost, query: &str, connector: &FakeConnector) -> Bootstrap {
    let (_inbound_tx, inbound) = mpsc::unbounded_channel::<InboundCall>();
    Bootstrap::new(
        LOCATION,
        query,
        Arc::new(host.clone()),
        inbound,
        Arc::new(connector.clone()),
    )
}

fn running(outcome: BootstrapOutcome) -> toolframe::RunningFrame {
    match outcome {
        BootstrapOutcome::Running(running) => running,
        other => panic!("expected a running frame, got {:?}", other),
    }
}

#[tokio::test]
async fn not_installed_tool_shows_notice_without_connecting() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({}))
        .reply_with(
            "get-frame-config",
            json!({"type": "not-installed", "display_name": "Kanban"}),
        );
    let connector = FakeConnector::new();
    let bootstrap = bootstrap(&host, "outerKind=Single&viewKind=main", &connector);
    let phases = bootstrap.phases();

    let outcome = bootstrap.run().await.unwrap();

    let BootstrapOutcome::NotInstalled(notice) = outcome else {
        panic!("expected not-installed outcome");
    };
    assert!(notice.to_string().contains("Kanban"));
    assert!(connector.opened().is_empty());
    assert_eq!(*phases.borrow(), Phase::NotInstalled);
}

#[tokio::test]
async fn asset_view_fetches_location_before_configure() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({}))
        .reply_with(
            "get-location-for-locator",
            json!({"role_name": "forum", "integrity_module": "posts_integrity", "entry_type": "Post"}),
        )
        .reply_with("get-frame-config", single_config());
    let connector = FakeConnector::new();
    let query = "outerKind=Single&viewKind=asset&locator=hrl://uhC0kOrigin/uhCkkRecord&context=gA";

    let frame = running(bootstrap(&host, query, &connector).run().await.unwrap());

    assert_eq!(host.count("get-location-for-locator"), 1);
    let kinds = host.kinds();
    let lookup = kinds.iter().position(|k| *k == "get-location-for-locator");
    let configure = kinds.iter().position(|k| *k == "get-frame-config");
    assert!(lookup < configure);

    let info = frame.render_info();
    let RenderInfo::Single {
        view: SingleView::Asset { locator, location },
        ..
    } = info.as_ref()
    else {
        panic!("expected single asset view");
    };
    assert_eq!(locator.context.as_ref().unwrap().as_bytes(), &[0x80]);
    assert_eq!(location.as_ref().unwrap().role_name, "forum");
}

#[tokio::test]
async fn cross_creatable_is_rejected_before_configure() {
    let host = ScriptedHost::new().reply_with("get-store-snapshot", json!({}));
    let connector = FakeConnector::new();
    let bootstrap = bootstrap(
        &host,
        "outerKind=Cross&viewKind=creatable&creatable=poll&id=d1",
        &connector,
    );
    let phases = bootstrap.phases();

    let err = bootstrap.run().await.unwrap_err();

    assert!(matches!(
        err,
        FrameError::Query(QueryError::InvalidPairing { .. })
    ));
    assert_eq!(host.count("get-frame-config"), 0);
    assert_eq!(*phases.borrow(), Phase::Failed);
    assert!(!err.fallback_notice().is_empty());
}

#[tokio::test]
async fn single_main_connects_and_listens() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({"theme": "dark"}))
        .reply_with("get-frame-config", single_config());
    let connector = FakeConnector::new();
    let bootstrap = bootstrap(&host, "outerKind=Single&viewKind=main", &connector);
    let phases = bootstrap.phases();

    let mut frame = running(bootstrap.run().await.unwrap());

    assert_eq!(*phases.borrow(), Phase::Ready);
    assert!(frame.take_listener().is_some());
    assert!(frame.take_listener().is_none());

    let tokens: Vec<Vec<u8>> = connector.opened().into_iter().map(|p| p.auth_token).collect();
    assert_eq!(tokens.len(), 2);
    assert!(tokens.contains(&vec![1]));
    assert!(tokens.contains(&vec![2]));

    let info = frame.render_info();
    let RenderInfo::Single {
        identity,
        group_profiles,
        connections,
        ..
    } = info.as_ref()
    else {
        panic!("expected single render info");
    };
    assert_eq!(identity.hash().as_str(), common::IDENTITY);
    assert_eq!(group_profiles[0].name, "Friends");
    assert_eq!(connections.profiles_role, "profiles");
    assert_eq!(info.versions().host, "0.13.2");

    assert_eq!(frame.api().store().get("theme"), Some("dark".to_string()));
}

#[tokio::test]
async fn hydration_is_not_mirrored() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({"theme": "dark"}))
        .reply_with("get-frame-config", single_config());
    let frame = running(
        bootstrap(&host, "outerKind=Single&viewKind=main", &FakeConnector::new())
            .run()
            .await
            .unwrap(),
    );

    assert_eq!(host.count("mirror-store-set"), 0);
    frame.api().store().set("theme", "light");
    assert_eq!(host.count("mirror-store-set"), 1);
}

#[tokio::test]
async fn snapshot_failure_is_not_fatal() {
    let host = ScriptedHost::new()
        .reject("get-store-snapshot", "storage offline")
        .reply_with("get-frame-config", single_config());
    let frame = running(
        bootstrap(&host, "outerKind=Single&viewKind=main", &FakeConnector::new())
            .run()
            .await
            .unwrap(),
    );
    assert!(frame.api().store().keys().is_empty());
}

#[tokio::test]
async fn block_view_does_not_listen() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({}))
        .reply_with("get-frame-config", single_config());
    let mut frame = running(
        bootstrap(
            &host,
            "outerKind=Single&viewKind=block&block=latest",
            &FakeConnector::new(),
        )
        .run()
        .await
        .unwrap(),
    );
    assert!(frame.take_listener().is_none());
}

#[tokio::test]
async fn config_for_other_scope_is_fatal() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({}))
        .reply_with("get-frame-config", cross_config());
    let connector = FakeConnector::new();

    let err = bootstrap(&host, "outerKind=Single&viewKind=main", &connector)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FrameError::ConfigMismatch {
            view: ViewScope::Single,
            config: ViewScope::Cross,
        }
    ));
    assert!(connector.opened().is_empty());
}

#[tokio::test]
async fn config_request_carries_scope() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({}))
        .reply_with("get-frame-config", cross_config());
    running(
        bootstrap(&host, "outerKind=Cross&viewKind=main", &FakeConnector::new())
            .run()
            .await
            .unwrap(),
    );
    assert!(host
        .requests()
        .contains(&HostRequest::GetFrameConfig { cross: true }));
}

#[tokio::test]
async fn single_connect_failure_is_fatal() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({}))
        .reply_with("get-frame-config", single_config());
    let connector = FakeConnector::new().refuse_token(vec![2]);

    let err = bootstrap(&host, "outerKind=Single&viewKind=main", &connector)
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, FrameError::Connect { .. }));
}

#[tokio::test]
async fn cross_connect_skips_failing_tool() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({}))
        .reply_with("get-frame-config", cross_config());
    let connector = FakeConnector::new().refuse_token(vec![11]);

    let frame = running(
        bootstrap(&host, "outerKind=Cross&viewKind=main", &connector)
            .run()
            .await
            .unwrap(),
    );

    let info = frame.render_info();
    let RenderInfo::Cross { tools, identity, .. } = info.as_ref() else {
        panic!("expected cross render info");
    };
    assert_eq!(identity.hash().as_str(), common::IDENTITY);
    assert_eq!(info.identity(), identity);
    let tools: Vec<&str> = tools.keys().map(|t| t.as_str()).collect();
    assert_eq!(tools, vec![TOOL_B]);
    assert!(!tools.contains(&TOOL_A));
}

#[tokio::test]
async fn connections_sign_through_the_host() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({}))
        .reply_with("get-frame-config", single_config())
        .on("sign-call", |request| match request {
            HostRequest::SignCall { call } => toolframe_rpc::testing::ok(json!({
                "call": call,
                "provenance": "uhCAkAgent",
                "signature": [4, 2],
            })),
            _ => toolframe_protocol::Reply::error("unexpected"),
        });
    let frame = running(
        bootstrap(&host, "outerKind=Single&viewKind=main", &FakeConnector::new())
            .run()
            .await
            .unwrap(),
    );

    let info = frame.render_info();
    let RenderInfo::Single { connections, .. } = info.as_ref() else {
        panic!("expected single render info");
    };
    let response = connections
        .app
        .call(BackendCall::Unsigned(UnsignedCall {
            role_name: "forum".to_string(),
            module: "posts".to_string(),
            function: "create_post".to_string(),
            payload: Vec::new(),
        }))
        .await
        .unwrap();
    assert_eq!(response, vec![4, 2]);
    assert_eq!(host.count("sign-call"), 1);
}

#[tokio::test]
async fn client_attached_pushes_catalog() {
    let host = ScriptedHost::new()
        .reply_with("get-store-snapshot", json!({}))
        .reply_with("get-frame-config", single_config())
        .reply_with("push-creatable-catalog", Value::Null);
    let frame = running(
        bootstrap(&host, "outerKind=Single&viewKind=main", &FakeConnector::new())
            .run()
            .await
            .unwrap(),
    );

    frame.client_attached().await.unwrap();
    assert!(host.requests().contains(&HostRequest::PushCreatableCatalog {
        catalog: Default::default()
    }));
}

#[tokio::test]
async fn bad_location_fails_identify() {
    let host = ScriptedHost::new();
    let (_tx, inbound) = mpsc::unbounded_channel::<InboundCall>();
    let bootstrap = Bootstrap::new(
        "http://localhost:8888/",
        "outerKind=Single&viewKind=main",
        Arc::new(host.clone()),
        inbound,
        Arc::new(FakeConnector::new()),
    );

    let err = bootstrap.run().await.unwrap_err();
    assert!(matches!(err, FrameError::Identity(_)));
    assert!(host.kinds().is_empty());
}
