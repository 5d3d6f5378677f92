// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera enumeration
//!
//! Cameras are discovered through `pw-cli`. The listing does not carry
//! libcamera's location property, so each video source is queried once more
//! with `pw-cli info` to learn which way it faces.

use super::super::types::{CameraDevice, CameraPosition};
use tracing::{debug, info, warn};

/// A video source node as listed by `pw-cli ls Node`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct VideoNode {
    id: String,
    serial: Option<String>,
    name: String,
}

impl VideoNode {
    /// Target usable by `pipewiresrc target-object`
    fn target(&self) -> String {
        match &self.serial {
            Some(serial) => format!("pipewire-serial-{}", serial),
            None => format!("pipewire-{}", self.id),
        }
    }
}

/// Enumerate cameras using PipeWire
///
/// Returns `None` when PipeWire or its GStreamer source is unavailable.
pub fn enumerate_pipewire_cameras() -> Option<Vec<CameraDevice>> {
    debug!("Attempting to enumerate cameras via PipeWire");

    if !is_pipewire_available() {
        return None;
    }

    let output = std::process::Command::new("pw-cli")
        .args(["ls", "Node"])
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("pw-cli command failed");
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let cameras: Vec<CameraDevice> = parse_video_nodes(&stdout)
        .into_iter()
        .map(|node| {
            let position = query_node_position(&node.id);
            let path = node.target();
            debug!(id = %node.id, serial = ?node.serial, name = %node.name, %path, %position, "Found video camera");
            CameraDevice {
                name: node.name,
                path,
                metadata_path: Some(node.id),
                position,
            }
        })
        .collect();

    info!(count = cameras.len(), "Enumerated cameras via pw-cli");
    Some(cameras)
}

/// Check whether PipeWire capture is usable
pub fn is_pipewire_available() -> bool {
    if let Err(e) = gstreamer::init() {
        warn!(error = %e, "GStreamer init failed");
        return false;
    }

    if gstreamer::ElementFactory::make("pipewiresrc")
        .build()
        .is_err()
    {
        debug!("pipewiresrc not available");
        return false;
    }

    true
}

/// Parse `pw-cli ls Node` output into video source nodes
fn parse_video_nodes(stdout: &str) -> Vec<VideoNode> {
    let mut nodes = Vec::new();
    let mut current: Option<VideoNode> = None;
    let mut is_video_source = false;

    let mut finish = |node: Option<VideoNode>, is_video_source: bool| {
        if let Some(node) = node
            && is_video_source
            && !node.name.is_empty()
        {
            nodes.push(node);
        }
    };

    for line in stdout.lines() {
        let trimmed = line.trim();

        // Format: "id 76, type PipeWire:Interface:Node/3"
        if trimmed.starts_with("id ") && trimmed.contains("type PipeWire:Interface:Node") {
            finish(current.take(), is_video_source);
            is_video_source = false;

            if let Some(id) = trimmed
                .strip_prefix("id ")
                .and_then(|rest| rest.split(',').next())
            {
                current = Some(VideoNode {
                    id: id.trim().to_string(),
                    ..Default::default()
                });
            }
            continue;
        }

        let Some(node) = current.as_mut() else {
            continue;
        };

        if trimmed.contains("media.class") && trimmed.contains("\"Video/Source\"") {
            is_video_source = true;
        } else if trimmed.contains("object.serial") {
            node.serial = extract_quoted_value(trimmed);
        } else if trimmed.contains("node.description")
            && let Some(name) = extract_quoted_value(trimmed)
        {
            node.name = name;
        }
    }
    finish(current.take(), is_video_source);

    nodes
}

/// Extract quoted value from a property line (e.g., 'property = "value"' -> "value")
fn extract_quoted_value(line: &str) -> Option<String> {
    let start = line.find('"')?;
    let end = line[start + 1..].find('"')?;
    Some(line[start + 1..start + 1 + end].to_string())
}

/// Query which way a node faces using `pw-cli info`
fn query_node_position(node_id: &str) -> CameraPosition {
    match std::process::Command::new("pw-cli")
        .args(["info", node_id])
        .output()
    {
        Ok(output) if output.status.success() => {
            parse_location(&String::from_utf8_lossy(&output.stdout))
        }
        _ => {
            debug!(node_id, "Failed to query node info for location");
            CameraPosition::Unknown
        }
    }
}

/// Find `api.libcamera.location` in `pw-cli info` output
fn parse_location(info: &str) -> CameraPosition {
    info.lines()
        .map(str::trim)
        .filter(|line| line.contains("api.libcamera.location"))
        .find_map(extract_quoted_value)
        .map(|value| CameraPosition::from_location(&value))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
	id 31, type PipeWire:Interface:Node/3
 		object.serial = "31"
 		factory.id = "10"
 		node.description = "Built-in Audio Analog Stereo"
 		media.class = "Audio/Sink"
	id 62, type PipeWire:Interface:Node/3
 		object.serial = "2146"
 		object.path = "libcamera:/base/soc/i2c0/ov8858"
 		node.description = "Front Camera"
 		media.class = "Video/Source"
	id 64, type PipeWire:Interface:Node/3
 		node.description = "Laptop Webcam Module (2nd Gen) (V4L2)"
 		media.class = "Video/Source"
"#;

    #[test]
    fn test_parse_video_nodes_skips_audio() {
        let nodes = parse_video_nodes(LISTING);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "Front Camera");
        assert_eq!(nodes[0].target(), "pipewire-serial-2146");
        assert_eq!(nodes[1].id, "64");
        assert_eq!(nodes[1].target(), "pipewire-64");
    }

    #[test]
    fn test_parse_location() {
        let info = "  * \t\tapi.libcamera.location = \"front\"\n  * \t\tapi.libcamera.rotation = \"270\"";
        assert_eq!(parse_location(info), CameraPosition::Front);
        assert_eq!(parse_location("node.name = \"x\""), CameraPosition::Unknown);
    }

    #[test]
    fn test_extract_quoted_value() {
        assert_eq!(
            extract_quoted_value("node.nick = \"Webcam\"").as_deref(),
            Some("Webcam")
        );
        assert_eq!(extract_quoted_value("no quotes"), None);
    }
}
