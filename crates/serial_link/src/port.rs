use std::io::{Read, Write};

use serialport::{SerialPort, SerialPortType};

use crate::{config::LinkSettings, error::LinkError};

/// Byte stream to the board. The link keeps one handle for writing and hands a clone to its
/// reader thread.
pub trait LinkPort: Read + Write + Send {
    fn try_clone_port(&self) -> Result<Box<dyn LinkPort>, LinkError>;
}

pub trait PortOpener: Send + 'static {
    fn open(&self, settings: &LinkSettings) -> Result<Box<dyn LinkPort>, LinkError>;
}

impl LinkPort for Box<dyn SerialPort> {
    fn try_clone_port(&self) -> Result<Box<dyn LinkPort>, LinkError> {
        let clone = self.try_clone()?;
        Ok(Box::new(clone))
    }
}

/// Opens ports through the operating system's serial driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPorts;

impl PortOpener for SystemPorts {
    fn open(&self, settings: &LinkSettings) -> Result<Box<dyn LinkPort>, LinkError> {
        let port = serialport::new(&settings.port_name, settings.baud_rate)
            .timeout(settings.read_timeout())
            .open()
            .map_err(|source| LinkError::Open {
                port: settings.port_name.clone(),
                source,
            })?;
        Ok(Box::new(port))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSummary {
    pub name: String,
    pub description: String,
}

pub fn list_ports() -> Result<Vec<PortSummary>, LinkError> {
    let ports = serialport::available_ports()?;
    Ok(ports
        .into_iter()
        .map(|info| PortSummary {
            description: describe_port_type(&info.port_type),
            name: info.port_name,
        })
        .collect())
}

fn describe_port_type(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => {
            let product = usb.product.as_deref().unwrap_or("usb serial");
            format!("{product} ({:04x}:{:04x})", usb.vid, usb.pid)
        }
        SerialPortType::PciPort => "pci".to_string(),
        SerialPortType::BluetoothPort => "bluetooth".to_string(),
        SerialPortType::Unknown => "unknown".to_string(),
    }
}
