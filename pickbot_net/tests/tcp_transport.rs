use pickbot_net::{NetError, TcpTransport};
use pickbot_traits::{Channel, Transport};
use std::io::Read;
use std::net::{Ipv4Addr, TcpListener};
use std::time::Duration;

const LOCALHOST: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 1);
const TIMEOUT: Duration = Duration::from_secs(2);

/// Bind an ephemeral listener and return it with its port.
fn listener() -> (TcpListener, u16) {
    let l = TcpListener::bind((LOCALHOST, 0)).expect("bind");
    let port = l.local_addr().expect("local_addr").port();
    (l, port)
}

/// Accept one connection and read it to EOF.
fn accept_to_string(l: TcpListener) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let (mut stream, _) = l.accept().expect("accept");
        let mut buf = String::new();
        stream.read_to_string(&mut buf).expect("read");
        buf
    })
}

#[test]
fn control_command_arrives_newline_terminated() {
    let (control, control_port) = listener();
    let (_program, program_port) = listener();
    let reader = accept_to_string(control);

    let mut transport =
        TcpTransport::open_with_ports(LOCALHOST, control_port, program_port, TIMEOUT, TIMEOUT);
    transport
        .send(Channel::Control, "brake release")
        .expect("control send");
    drop(transport);

    assert_eq!(reader.join().unwrap(), "brake release\n");
}

#[test]
fn program_newline_is_not_duplicated() {
    let (_control, control_port) = listener();
    let (program, program_port) = listener();
    let reader = accept_to_string(program);

    let mut transport =
        TcpTransport::open_with_ports(LOCALHOST, control_port, program_port, TIMEOUT, TIMEOUT);
    transport
        .send(Channel::Program, "def f():\nend\nf()\n")
        .expect("program send");
    drop(transport);

    assert_eq!(reader.join().unwrap(), "def f():\nend\nf()\n");
}

#[test]
fn refused_connection_identifies_the_channel() {
    // Bind then drop to get a port that refuses connections.
    let (l, dead_port) = listener();
    drop(l);
    let (_program, program_port) = listener();

    let mut transport =
        TcpTransport::open_with_ports(LOCALHOST, dead_port, program_port, TIMEOUT, TIMEOUT);
    let err = transport
        .send(Channel::Control, "brake release")
        .expect_err("connect should be refused");
    let net = err
        .downcast_ref::<NetError>()
        .expect("typed network error");
    assert_eq!(net.channel(), Channel::Control);
    assert!(matches!(net, NetError::Connect { .. }));
}

#[test]
fn each_send_uses_a_fresh_connection() {
    let (control, control_port) = listener();
    let (program, program_port) = listener();
    let control_reader = accept_to_string(control);
    let program_reader = accept_to_string(program);

    let mut transport =
        TcpTransport::open_with_ports(LOCALHOST, control_port, program_port, TIMEOUT, TIMEOUT);
    transport
        .send(Channel::Control, "brake release")
        .expect("control send");
    transport
        .send(Channel::Program, "prog()")
        .expect("program send");
    drop(transport);

    // Both readers see EOF, proving each connection was closed after its write.
    assert_eq!(control_reader.join().unwrap(), "brake release\n");
    assert_eq!(program_reader.join().unwrap(), "prog()\n");
}
