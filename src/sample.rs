use serde::{Deserialize, Serialize};

/// One point-in-time utilization reading, tagged with the host's address.
///
/// Field order matters: it fixes the key order of the JSON body sent to
/// the server (`clientIP`, `cpuUsage`, `memoryUsage`, `diskUsage`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Address the sample is reported from, resolved once at startup.
    #[serde(rename = "clientIP")]
    pub client_ip: String,

    /// CPU utilization across all cores, percent.
    #[serde(rename = "cpuUsage")]
    pub cpu_usage: f64,

    /// Used physical memory over total, percent.
    #[serde(rename = "memoryUsage")]
    pub memory_usage: f64,

    /// Used space on the root filesystem, percent.
    #[serde(rename = "diskUsage")]
    pub disk_usage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_body_is_exact() {
        let sample = Sample {
            client_ip: "192.168.1.42".to_string(),
            cpu_usage: 12.5,
            memory_usage: 47.3,
            disk_usage: 88.0,
        };

        let body = serde_json::to_string(&sample).unwrap();
        assert_eq!(
            body,
            r#"{"clientIP":"192.168.1.42","cpuUsage":12.5,"memoryUsage":47.3,"diskUsage":88.0}"#
        );
    }

    #[test]
    fn test_round_trip() {
        let sample = Sample {
            client_ip: "10.0.0.7".to_string(),
            cpu_usage: 0.0,
            memory_usage: 99.9,
            disk_usage: 33.3,
        };

        let body = serde_json::to_string(&sample).unwrap();
        let decoded: Sample = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded, sample);
    }

    #[test]
    fn test_accepts_documented_field_names() {
        let decoded: Sample = serde_json::from_str(
            r#"{"clientIP":"172.16.0.2","cpuUsage":1.0,"memoryUsage":2.0,"diskUsage":3.0}"#,
        )
        .unwrap();

        assert_eq!(decoded.client_ip, "172.16.0.2");
        assert_eq!(decoded.cpu_usage, 1.0);
        assert_eq!(decoded.memory_usage, 2.0);
        assert_eq!(decoded.disk_usage, 3.0);
    }
}
