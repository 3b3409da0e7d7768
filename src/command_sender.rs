/* Copyright (c) 2023 Kevin Hutto

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE. */


use log::debug;
use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;
use thiserror::Error;

const DEVICE_BAUD: u32 = 9600;
const READ_TIMEOUT: Duration = Duration::from_secs(2);
const RESPONSE_WAIT: Duration = Duration::from_millis(200); //The device needs a moment before its reply is in the buffer

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to open serial port: {0}")]
    Port(#[from] serialport::Error),

    #[error("serial transfer failed: {0}")]
    Io(#[from] io::Error),

    #[error("response is not valid text: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

pub fn send_command_ext(port_name: &str, command: &str) -> Result<String, CommandError> {
    //Runs one request/response exchange with the device on the named port
    let port = serialport::new(port_name, DEVICE_BAUD)
        .timeout(READ_TIMEOUT)
        .open()?;

    let response = exchange(port, command)?;
    println!("Response: {}", response);

    Ok(response)
}

fn exchange<P: Read + Write>(mut port: P, command: &str) -> Result<String, CommandError> {
    //Writes the command with its terminating carriage return, then collects the reply.
    //The port handle is dropped here on every path, including the error ones.
    let framed = format!("{}\r", command);
    debug!("sending {} bytes: {:?}", framed.len(), framed);
    port.write_all(framed.as_bytes())?;

    thread::sleep(RESPONSE_WAIT);

    let raw = read_available(&mut port)?;
    debug!("received {} bytes", raw.len());

    let response = String::from_utf8(raw)?;
    Ok(response.trim().to_string())
}

fn read_available<R: Read>(port: &mut R) -> io::Result<Vec<u8>> {
    //Drains whatever the device has sent so far. The port timeout bounds the
    //wait when the device stays silent.
    let mut collected = Vec::new();
    let mut buf = [0u8; 512];

    loop {
        match port.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => collected.extend_from_slice(&buf[..n]),
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => break,
            Err(e) => return Err(e),
        }
    }

    Ok(collected)
}
