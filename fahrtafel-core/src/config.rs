//! Board configuration types
//!
//! One stop, fixed endpoints. There is no configuration UI; values are
//! baked in at build time and the endpoint URLs are assembled once at
//! construction.

use core::fmt::Write;

use heapless::String;

/// Capacity of an assembled endpoint URL
pub const URL_CAP: usize = 192;

/// Wi-Fi credentials, consumed by the board's `NetworkInterface` impl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
}

/// The monitored stop and its coordinates (for the weather readout)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopConfig {
    /// EFA stop identifier
    pub stop_id: &'static str,
    pub latitude: &'static str,
    pub longitude: &'static str,
}

/// Fully assembled endpoint URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Transit departure monitor (JSON)
    pub departures_url: String<URL_CAP>,
    /// Weather endpoint (JSON)
    pub weather_url: String<URL_CAP>,
    /// Replacement offline dataset (postcard)
    pub dataset_url: String<URL_CAP>,
}

impl EndpointConfig {
    /// Assemble the endpoint URLs for a stop.
    pub fn for_stop(stop: &StopConfig, dataset_url: &str) -> Self {
        let mut departures = String::new();
        let _ = write!(
            departures,
            "http://www.kvv.de/tunnelEfaDirect.php?action=XSLT_DM_REQUEST\
             &outputFormat=JSON&mode=direct&type_dm=any&useRealtime=1&limit=5&name_dm={}",
            stop.stop_id
        );

        let mut weather = String::new();
        let _ = write!(
            weather,
            "http://api.open-meteo.com/v1/forecast?latitude={}&longitude={}&current_weather=true",
            stop.latitude, stop.longitude
        );

        let mut dataset = String::new();
        let _ = dataset.push_str(dataset_url);

        Self {
            departures_url: departures,
            weather_url: weather,
            dataset_url: dataset,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub wifi: WifiConfig,
    pub stop: StopConfig,
    pub endpoints: EndpointConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let stop = StopConfig {
            stop_id: "7001862", // Bad Schönborn Süd
            latitude: "49.2208",
            longitude: "8.6469",
        };
        Self {
            wifi: WifiConfig {
                ssid: "YOUR_WIFI_SSID",
                password: "YOUR_WIFI_PASSWORD",
            },
            endpoints: EndpointConfig::for_stop(
                &stop,
                "https://raw.githubusercontent.com/mrnightraven743/kvv-schedule/main/offline_data.bin",
            ),
            stop,
        }
    }
}
