//! Reconnect gating across the link and session managers.

use crate::mock_hw::{MockClock, MockHardware, MockLink, MockSession, Recorded, RecordingSink};

use pirnode::app::service::NodeService;
use pirnode::config::{self, NodeConfig, ReconnectPolicy};
use pirnode::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Link(u64),
    Session(u64),
}

impl Attempt {
    fn at(self) -> u64 {
        match self {
            Self::Link(t) | Self::Session(t) => t,
        }
    }
}

/// Run the loop from 0 to `until_ms` and record every attempt with its time.
fn run(
    node: &mut NodeService,
    link: &mut MockLink,
    session: &mut MockSession,
    until_ms: u64,
    mut on_tick: impl FnMut(u64, &mut MockLink),
) -> Vec<Attempt> {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let clock = MockClock::unsynced(0);
    let mut attempts = Vec::new();

    while clock.uptime.get() <= until_ms {
        let now = clock.uptime.get();
        let links_before = link.reconnects;
        let sessions_before = session.connect_attempts.len();

        node.tick(&mut hw, link, session, &clock, &mut sink);

        if link.reconnects > links_before {
            attempts.push(Attempt::Link(now));
        }
        if session.connect_attempts.len() > sessions_before {
            attempts.push(Attempt::Session(now));
        }
        on_tick(now, link);
        clock.advance(config::LOOP_PERIOD_MS);
    }
    attempts
}

#[test]
fn shared_gate_spaces_all_attempts() {
    let mut node = NodeService::new(NodeConfig::default());
    let mut link = MockLink::down();
    let mut session = MockSession::refusing(SessionError::ConnectFailed);

    let attempts = run(&mut node, &mut link, &mut session, 30_000, |_, _| {});

    assert!(!attempts.is_empty());
    for pair in attempts.windows(2) {
        assert!(
            pair[1].at() - pair[0].at() >= config::RECONNECT_DELAY_MS,
            "attempts too close: {:?}",
            pair
        );
    }
}

#[test]
fn shared_gate_lets_link_starve_session_while_link_is_down() {
    let mut node = NodeService::new(NodeConfig::default());
    let mut link = MockLink::down();
    let mut session = MockSession::refusing(SessionError::ConnectFailed);

    let attempts = run(&mut node, &mut link, &mut session, 20_000, |_, _| {});

    assert_eq!(
        attempts,
        vec![
            Attempt::Link(5_000),
            Attempt::Link(10_000),
            Attempt::Link(15_000),
            Attempt::Link(20_000),
        ]
    );
}

#[test]
fn session_waits_out_the_link_window() {
    let mut node = NodeService::new(NodeConfig::default());
    let mut link = MockLink::down();
    let mut session = MockSession::disconnected();

    // The stack finishes associating shortly after the request.
    let attempts = run(&mut node, &mut link, &mut session, 12_000, |now, link| {
        if now == 5_100 {
            link.up = true;
        }
    });

    assert_eq!(attempts, vec![Attempt::Link(5_000), Attempt::Session(10_000)]);
    assert!(session.connected);
}

#[test]
fn independent_gates_may_fire_together() {
    let cfg = NodeConfig {
        reconnect_policy: ReconnectPolicy::Independent,
        ..NodeConfig::default()
    };
    let mut node = NodeService::new(cfg);
    let mut link = MockLink::down();
    let mut session = MockSession::refusing(SessionError::ConnectionTimeout);

    let attempts = run(&mut node, &mut link, &mut session, 10_000, |_, _| {});

    assert_eq!(
        attempts,
        vec![
            Attempt::Link(5_000),
            Attempt::Session(5_000),
            Attempt::Link(10_000),
            Attempt::Session(10_000),
        ]
    );
}

#[test]
fn link_up_never_requests_reconnect() {
    let mut node = NodeService::new(NodeConfig::default());
    let mut link = MockLink::up();
    let mut session = MockSession::connected();

    let attempts = run(&mut node, &mut link, &mut session, 30_000, |_, _| {});

    assert!(attempts.is_empty());
    assert_eq!(link.reconnects, 0);
}

#[test]
fn reconnect_request_is_logged() {
    let mut node = NodeService::new(NodeConfig::default());
    let mut hw = MockHardware::new();
    let mut link = MockLink::down();
    let mut session = MockSession::disconnected();
    let mut sink = RecordingSink::new();
    let clock = MockClock::unsynced(config::RECONNECT_DELAY_MS);

    let report = node.tick(&mut hw, &mut link, &mut session, &clock, &mut sink);

    assert!(report.link_reconnect_requested);
    assert_eq!(sink.events, vec![Recorded::LinkReconnecting]);
}
