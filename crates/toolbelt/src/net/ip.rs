use crate::http::HttpClient;
use crate::prelude::*;
use colored::Colorize;
use std::net::IpAddr;
use toolbelt_core::error::{require_input, ToolError};
use toolbelt_core::net::{ipapi_url, parse_ipapi, parse_ipify, IpInfo, IPIFY_URL};

/// Our own address as seen from the outside.
pub async fn public_address(client: &impl HttpClient) -> Result<String> {
    let body = client.get_json(IPIFY_URL).await?;
    Ok(parse_ipify(&body)?)
}

/// Geolocates `address`, or our own public address when `None`.
pub async fn lookup(client: &impl HttpClient, address: Option<&str>) -> Result<IpInfo> {
    let address = match address {
        Some(address) => {
            let address = require_input(address)?.trim();
            address
                .parse::<IpAddr>()
                .map_err(|_| ToolError::parse(format!("'{address}' is not an IP address")))?
                .to_string()
        }
        None => public_address(client).await?,
    };
    log::debug!("looking up {address}");
    let body = client.get_json(&ipapi_url(&address)).await?;
    Ok(parse_ipapi(&body)?)
}

pub fn render(info: &IpInfo) -> String {
    let mut table = new_table();
    table.add_row(prettytable::row!["IP".bold(), info.ip]);
    let rows = [
        ("Location", info.location()),
        ("Postal", info.postal.clone()),
        ("Timezone", info.timezone.clone()),
        ("ISP", info.org.clone()),
        (
            "Coordinates",
            info.latitude
                .zip(info.longitude)
                .map(|(lat, lon)| f!("{lat}, {lon}")),
        ),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            table.add_row(prettytable::row![label.bold(), value]);
        }
    }
    table.to_string()
}
