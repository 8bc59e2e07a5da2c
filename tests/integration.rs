
use mock_server as ms;
use ostack_net::config::AppConfig;
use ostack_net::{GatewayMaps, HostSet, HttpControlPlane, Ostack, OstackError};
use tokio_test::{assert_err, assert_ok};

const AGENTS: &str = r#"{"agents": [
    {"binary": "neutron-openvswitch-agent", "host": "c1r1.example.com", "alive": true},
    {"binary": "neutron-openvswitch-agent",
     "host": "c1r2:1ed04397-35fb-51ca-a932-29d8e09be240", "alive": true},
    {"binary": "neutron-dhcp-agent", "host": "c1r1", "alive": true},
    {"binary": "neutron-metering-agent", "host": "net1", "alive": true}
]}"#;

const PORTS: &str = r#"{"ports": [
    {"mac_address": "fa:16:3e:aa:00:01", "tenant_id": "t1",
     "fixed_ips": [{"subnet_id": "s1", "ip_address": "10.0.0.1"}]},
    {"mac_address": "fa:16:3e:aa:00:02", "tenant_id": "t1",
     "fixed_ips": [{"subnet_id": "s2", "ip_address": "10.0.1.1"}]}
]}"#;

fn password_config(server: &mockito::ServerGuard) -> AppConfig {
    AppConfig {
        auth_url: Some(format!("{}/v3", server.url())),
        username: Some("admin".to_string()),
        password: Some("secret".to_string()),
        project_name: Some("admin".to_string()),
        network_url: Some(server.url()),
        compute_url: Some(server.url()),
        ..AppConfig::default()
    }
}

fn token_config(server: &mockito::ServerGuard) -> AppConfig {
    AppConfig {
        token: Some(ms::TOKEN.to_string()),
        network_url: Some(server.url()),
        ..AppConfig::default()
    }
}

fn ostack(config: &AppConfig) -> Ostack<HttpControlPlane> {
    let control_plane = HttpControlPlane::from_config(config).unwrap();
    Ostack::from_config(control_plane, config)
}

#[tokio::test]
async fn password_auth_token_reused_across_queries() {
    let mut server = ms::create_mock_http_server().await;
    let keystone = ms::add_keystone_mock(&mut server, 1).await;
    let agents = server
        .mock("GET", "/v2.0/agents")
        .match_header("x-auth-token", ms::TOKEN)
        .with_status(200)
        .with_body(AGENTS)
        .expect(2)
        .create_async()
        .await;

    let ostack = ostack(&password_config(&server));
    let mut seen = HostSet::new();

    let ovs = ostack.list_net_hosts(&mut seen, true).await.unwrap();
    let rest = ostack.list_net_hosts(&mut seen, false).await.unwrap();

    assert_eq!(ovs, "c1r1 c1r2");
    assert_eq!(rest, "net1");
    keystone.assert_async().await;
    agents.assert_async().await;
}

#[tokio::test]
async fn expired_token_triggers_reauthentication() {
    let mut server = ms::create_mock_http_server().await;
    let keystone = ms::add_keystone_mock(&mut server, 2).await;
    let _agents = ms::add_get_mock(&mut server, "/v2.0/agents", AGENTS, 200).await;

    let config = AppConfig {
        token_lifetime_secs: 0,
        ..password_config(&server)
    };
    let ostack = ostack(&config);
    let mut seen = HostSet::new();

    assert_ok!(ostack.list_net_hosts(&mut seen, false).await);
    assert_ok!(ostack.list_net_hosts(&mut seen, false).await);
    keystone.assert_async().await;
}

#[tokio::test]
async fn keystone_rejection_is_auth_error() {
    let mut server = ms::create_mock_http_server().await;
    let _keystone = server
        .mock("POST", "/v3/auth/tokens")
        .with_status(401)
        .with_body(r#"{"error": {"code": 401, "title": "Unauthorized"}}"#)
        .create_async()
        .await;

    let ostack = ostack(&password_config(&server));
    let mut seen = HostSet::new();

    let err = assert_err!(ostack.list_net_hosts(&mut seen, false).await);
    assert!(matches!(err, OstackError::Auth(_)));
    assert!(seen.is_empty());
}

#[tokio::test]
async fn gateway_maps_project_scoped_single_request() {
    let mut server = ms::create_mock_http_server().await;
    let ports = ms::add_ports_mock(&mut server, Some("t1"), PORTS).await;

    let config = AppConfig {
        project_id: Some("t1".to_string()),
        ..token_config(&server)
    };
    let ostack = ostack(&config);
    let mut maps = GatewayMaps::new();

    ostack.gateway_maps(&mut maps, true, true).await.unwrap();

    assert_eq!(maps.mac2ip["fa:16:3e:aa:00:01"], "t1/10.0.0.1");
    assert_eq!(maps.ip2mac["t1/10.0.1.1"], "fa:16:3e:aa:00:02");
    ports.assert_async().await;
}

#[tokio::test]
async fn gateway_list_unscoped_without_project() {
    let mut server = ms::create_mock_http_server().await;
    let ports = ms::add_ports_mock(&mut server, None, PORTS).await;

    let ostack = ostack(&token_config(&server));

    let list = ostack.gateway_list().await.unwrap();

    assert_eq!(
        list,
        vec!["fa:16:3e:aa:00:01 10.0.0.1", "fa:16:3e:aa:00:02 10.0.1.1"]
    );
    ports.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_status_error() {
    let mut server = ms::create_mock_http_server().await;
    let _networks = ms::add_get_mock(
        &mut server,
        "/v2.0/networks",
        r#"{"NeutronError": {"type": "PolicyNotAuthorized"}}"#,
        403,
    )
    .await;

    let ostack = ostack(&token_config(&server));

    let err = assert_err!(ostack.network_info_map().await);
    match err {
        OstackError::Status { status, body, .. } => {
            assert_eq!(status, 403);
            assert!(body.contains("PolicyNotAuthorized"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let mut server = ms::create_mock_http_server().await;
    let _networks =
        ms::add_get_mock(&mut server, "/v2.0/networks", "<html>bad gateway</html>", 200).await;

    let ostack = ostack(&token_config(&server));

    let err = assert_err!(ostack.network_info_map().await);
    assert!(matches!(err, OstackError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let config = AppConfig {
        token: Some(ms::TOKEN.to_string()),
        network_url: Some("http://127.0.0.1:1".to_string()),
        timeout_secs: 2,
        ..AppConfig::default()
    };
    let ostack = ostack(&config);

    let err = assert_err!(ostack.network_info_map().await);
    assert!(matches!(err, OstackError::Transport { .. }));
}

#[tokio::test]
async fn dump_json_writes_raw_body() {
    let mut server = ms::create_mock_http_server().await;
    let _keystone = ms::add_keystone_mock(&mut server, 1).await;
    let _hypervisors = ms::add_get_mock(
        &mut server,
        "/v2.1/os-hypervisors",
        r#"{"hypervisors": []}"#,
        200,
    )
    .await;

    let ostack = ostack(&password_config(&server));
    let mut out = Vec::new();

    ostack.dump_json("v2.1/os-hypervisors", &mut out).await.unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "json= {\"hypervisors\": []}\n"
    );
}
