//! Demo catalog inserted into an empty table on first start.

use serde_json::{json, Value};

/// The four bootstrap products, as raw payloads for the validator.
pub(crate) fn sample_products() -> Vec<Value> {
    vec![
        json!({
            "name": "Mythic Legends",
            "category": "Mobile Game",
            "description": "3D action RPG for mobile. Striking visuals and an immersive story that has won over millions of players worldwide.",
            "detailedDescription": "Mythic Legends is a 3D action RPG built on a modern engine. Collect more than 100 heroes, explore a wide range of dungeons and fight in real-time PvP.",
            "code": "ML-001",
            "image": "https://images.unsplash.com/photo-1550745165-9bc0b252726f?w=800&h=600&fit=crop",
            "specs": ["Android 6.0+", "iOS 12.0+", "3GB RAM", "2GB Storage"],
            "features": ["100+ collectible heroes", "Real-time PvP", "Auto battle", "Guilds", "Regular events", "High quality 3D graphics"],
            "price": "0",
        }),
        json!({
            "name": "Puzzle Quest Adventure",
            "category": "Mobile Game",
            "description": "A casual game mixing puzzles and adventure. Simple controls anyone can pick up, with addictive gameplay.",
            "detailedDescription": "Puzzle Quest Adventure combines match puzzles with adventure elements.",
            "code": "PQA-002",
            "image": "https://images.unsplash.com/photo-1511512578047-dfb367046420?w=800&h=600&fit=crop",
            "specs": ["Android 5.0+", "iOS 11.0+", "1GB RAM", "500MB Storage"],
            "features": ["500+ levels", "Character collection", "Daily quests", "Weekly events", "Social features", "Offline play"],
            "price": "0",
        }),
        json!({
            "name": "Racing Champions",
            "category": "Mobile Game",
            "description": "High-speed racing. Realistic physics and deep car customization let you build your own racing experience.",
            "detailedDescription": "Racing Champions brings a console-grade racing experience to mobile.",
            "code": "RC-003",
            "image": "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?w=800&h=600&fit=crop",
            "specs": ["Android 7.0+", "iOS 13.0+", "2GB RAM", "1.5GB Storage"],
            "features": ["50+ licensed cars", "Real-time multiplayer", "Leagues", "Car customization", "Varied tracks", "Realistic physics"],
            "price": "0",
        }),
        json!({
            "name": "Idle Empire Builder",
            "category": "Mobile Game",
            "description": "Idle empire building. Gather resources automatically, expand your empire and raise a powerful army.",
            "detailedDescription": "Idle Empire Builder blends strategy with idle gameplay.",
            "code": "IEB-004",
            "image": "https://images.unsplash.com/photo-1511512578047-dfb367046420?w=800&h=600&fit=crop",
            "specs": ["Android 5.0+", "iOS 11.0+", "1GB RAM", "800MB Storage"],
            "features": ["Idle gameplay", "Offline rewards", "Many buildings", "Heroes", "Empire wars", "Guild co-op"],
            "price": "0",
        }),
    ]
}
