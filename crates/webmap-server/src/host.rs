use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;
use webmap_render::ColumnSource;

/// A unit handed over by the host for rendering. Implementations own (or share) a snapshot of
/// the unit's blocks so it can be sampled on a worker thread.
pub trait HostUnit: ColumnSource + Send + 'static {
    /// Dimension identifier, e.g. `minecraft:overworld`
    fn dimension(&self) -> &str;

    /// False while the host is still generating the unit
    fn is_complete(&self) -> bool {
        true
    }
}

/// World state gathered on the metadata tick
#[derive(Debug, Clone, Default)]
pub struct ServerSnapshot {
    pub motd: String,
    pub dimensions: Vec<DimensionSnapshot>,
}

#[derive(Debug, Clone)]
pub struct DimensionSnapshot {
    pub id: String,
    /// Ticks since the world was created, including elapsed days
    pub time_of_day: i64,
    pub raining: bool,
    pub players: Vec<PlayerSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub uuid: Uuid,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

const TICKS_PER_DAY: i64 = 24000;

impl ServerSnapshot {
    pub fn meta(&self) -> Value {
        json!({ "name": self.motd })
    }
}

impl DimensionSnapshot {
    pub fn meta(&self) -> Value {
        json!({
            "time": self.time_of_day % TICKS_PER_DAY,
            "day": self.time_of_day / TICKS_PER_DAY,
            "weather": if self.raining { "raining" } else { "clear" },
            "players": self.players,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_meta() {
        let snapshot = ServerSnapshot {
            motd: "A Minecraft Server".to_owned(),
            dimensions: Vec::new(),
        };
        assert_eq!(snapshot.meta(), json!({ "name": "A Minecraft Server" }));
    }

    #[test]
    fn test_dimension_meta() {
        let uuid = Uuid::new_v3(&Uuid::NAMESPACE_DNS, b"Steve");
        let dimension = DimensionSnapshot {
            id: "minecraft:overworld".to_owned(),
            time_of_day: 3 * 24000 + 6000,
            raining: true,
            players: vec![PlayerSnapshot {
                name: "Steve".to_owned(),
                uuid,
                x: 1.5,
                y: 64.0,
                z: -3.25,
            }],
        };

        let meta = dimension.meta();
        assert_eq!(meta["time"], 6000);
        assert_eq!(meta["day"], 3);
        assert_eq!(meta["weather"], "raining");
        assert_eq!(meta["players"][0]["name"], "Steve");
        assert_eq!(meta["players"][0]["uuid"], uuid.to_string());
        assert_eq!(meta["players"][0]["z"], -3.25);
    }

    #[test]
    fn test_clear_weather() {
        let dimension = DimensionSnapshot {
            id: "minecraft:the_end".to_owned(),
            time_of_day: 100,
            raining: false,
            players: Vec::new(),
        };
        assert_eq!(dimension.meta()["weather"], "clear");
        assert_eq!(dimension.meta()["players"], json!([]));
    }
}
