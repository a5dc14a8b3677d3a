//! HysteriaGen: interactive setup wizard for a Hysteria proxy server
//!
//! Walks through certificate mode, transport protocol, port, and password,
//! writes the server/client JSON configs and the docker-compose file,
//! brings the container up, and prints a shareable connection URL plus its
//! QR rendering.

use anyhow::Result;
use hysgen_config::{
    CertificateResolver, Credential, PortAllocator, Prompter, Protocol, TcpProbe, assemble,
};
use hysgen_net::{HttpOptions, fetch_qr, public_ip};
use hysgen_system::{
    Distro, OpensslCertTool, ShellRunner, compose_up, ensure_docker, install_dependencies, kernel,
    write_client_config, write_compose_file, write_server_config,
};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

mod banner;

/// Fragment label attached to the share URL.
const SHARE_LABEL: &str = "mikasa";

fn main() -> Result<()> {
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    banner::print();
    info!("creating hysteria setup");

    let runner = ShellRunner;
    let distro = Distro::detect()?;
    println!("Distro : {}", distro.name);
    match kernel(&runner) {
        Ok(version) => println!("Kernel : {version}"),
        Err(e) => warn!("could not identify the kernel: {e}"),
    }

    let http = HttpOptions::default();
    let server_ip = public_ip(&http)?;
    println!("IP : {server_ip}");

    let mut prompter = Prompter::stdio();

    let cert_tool = OpensslCertTool::new(&runner);
    let bundle = CertificateResolver::new(&cert_tool).resolve(&mut prompter)?;

    let protocol = Protocol::select(&mut prompter)?;
    println!("Transport Protocol : {protocol}");

    let probe = TcpProbe::default();
    let allocator = PortAllocator::new(&probe);
    let port = prompter.ask(
        "Set hysteria port [1-65535] (Press Enter for a random port between 2000-65535): ",
        |raw| allocator.resolve(raw),
    )?;
    if port.in_use {
        println!("PORT is already being used");
    }
    println!("Hysteria PORT : {}", port.port);

    let credential = prompter.ask(
        "Set the hysteria authentication password, Press enter for random password: ",
        Credential::resolve,
    )?;
    println!("Authentication Password confirmed: {credential}");

    let assembly = assemble(port, protocol, &credential, &bundle, &server_ip, SHARE_LABEL);

    write_server_config(&assembly.server)?;
    write_compose_file(&assembly.server)?;

    install_dependencies(&runner, &distro)?;
    ensure_docker(&runner)?;
    compose_up(&runner)?;

    let client_json = write_client_config(&assembly.client)?;
    println!("Client configuration created!");
    println!("Use the configuration below with hysteria or import it into your client:");
    println!("{client_json}");

    println!("{}", assembly.share_url);
    let qr = fetch_qr(&assembly.share_url, &http)?;
    println!("{qr}");

    Ok(())
}
