use clap::{App, Arg};
use cmdsender::command_sender;

const DEVICE_PORT: &str = "COM3"; //Example: a system connected on COM3. Use /dev/ttyUSB0 or similar on Linux
const DEVICE_COMMAND: &str = "AZ+0.5"; //Example positioning command understood by the device

fn main() {
    env_logger::init();

    let matches = App::new("cmdsender")
        .version("0.1.0")
        .about("Sends one command over a serial line and prints the response")
        .arg(
            Arg::with_name("port")
                .short("p")
                .long("port")
                .takes_value(true)
                .default_value(DEVICE_PORT)
                .help("Serial device name, ex. COM3 or /dev/ttyUSB0"),
        )
        .arg(
            Arg::with_name("command")
                .short("c")
                .long("command")
                .takes_value(true)
                .default_value(DEVICE_COMMAND)
                .help("Command text to send. A carriage return is appended"),
        )
        .get_matches();

    let port_name = matches.value_of("port").unwrap();
    let command = matches.value_of("command").unwrap();

    send_device_command(port_name, command);
}

fn send_device_command(port_name: &str, command: &str) {
    //Calls the command sender to run one request/response exchange
    match command_sender::send_command_ext(port_name, command) {
        Ok(_response) => {}
        Err(e) => {
            eprintln!("Failed to send \"{}\" to \"{}\". Error: {}", command, port_name, e);
            ::std::process::exit(1);
        }
    }
}
