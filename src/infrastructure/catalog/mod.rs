// src/infrastructure/catalog/mod.rs
// Fixed marketplace data the catalog starts from

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::models::{CategoryId, Listing, Review, Transaction};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn image(photo: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{0}/pexels-photo-{0}.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2",
        photo
    )
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    name: &str,
    description: &str,
    creator: &str,
    creator_wallet: &str,
    price: Decimal,
    photo: u32,
    rating: f64,
    reviews: u32,
    category: CategoryId,
    tag_values: &[&str],
    created: NaiveDate,
    featured: bool,
) -> Listing {
    Listing {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        creator: creator.to_string(),
        creator_wallet: creator_wallet.to_string(),
        price,
        currency: "ETH".to_string(),
        image_url: image(photo),
        rating,
        reviews,
        category,
        tags: tags(tag_values),
        created,
        owned: false,
        featured,
    }
}

pub fn seed_listings() -> Vec<Listing> {
    vec![
        listing(
            "model-1",
            "ImageCraft Pro",
            "Advanced image generation model with photorealistic outputs. Perfect for creative professionals and designers looking for high-quality visuals.",
            "AILabs",
            "0x7c1Ea80e9d343c9613C516BbDa4A7a80323949E6",
            dec!(0.5),
            3183150,
            4.8,
            124,
            CategoryId::ImageGeneration,
            &["image", "photorealistic", "generative", "creative"],
            date(2024, 8, 12),
            true,
        ),
        listing(
            "model-2",
            "TextGenius",
            "State-of-the-art language model for content generation, summarization, and creative writing assistance.",
            "OpenMind",
            "0x2B5AD5c4795c026514f8317c7a215E218DcCD6cF",
            dec!(0.3),
            276452,
            4.6,
            87,
            CategoryId::TextGeneration,
            &["text", "language", "writing", "content"],
            date(2024, 9, 5),
            false,
        ),
        listing(
            "model-3",
            "SoundWave AI",
            "Generate professional-quality music, sound effects, and voice narration for any creative project.",
            "AudioLabs",
            "0x9F7A946d935c8Efc7A8329C0d8bD46c7f4F936Bf",
            dec!(0.25),
            164829,
            4.7,
            62,
            CategoryId::AudioGeneration,
            &["audio", "music", "voice", "sound effects"],
            date(2024, 7, 22),
            false,
        ),
        listing(
            "model-4",
            "DataSense",
            "Advanced analytics model for processing and visualizing complex datasets with minimal configuration.",
            "DataMinds",
            "0x3d2e397F94e415d7773E72e44D5B5338a99E77d9",
            dec!(0.4),
            577585,
            4.5,
            43,
            CategoryId::DataAnalysis,
            &["data", "analytics", "visualization", "insights"],
            date(2024, 9, 18),
            false,
        ),
        listing(
            "model-5",
            "VisionDetect",
            "Computer vision model for object detection, face recognition, and scene understanding.",
            "VisionTech",
            "0x1Dc4c1cEf673fBE5f5716761C72512B5a8c24d8A",
            dec!(0.35),
            2599244,
            4.4,
            56,
            CategoryId::ComputerVision,
            &["vision", "detection", "recognition", "perception"],
            date(2024, 8, 30),
            false,
        ),
        listing(
            "model-6",
            "CreativeFlow",
            "Multi-modal creative assistant that generates art in various styles based on text descriptions.",
            "ArtificialCreative",
            "0x6E8ea9E1A5F9d982Ed900fE0A33F5DF3d4C5b1fA",
            dec!(0.45),
            1762851,
            4.9,
            112,
            CategoryId::ImageGeneration,
            &["art", "creative", "styles", "generation"],
            date(2024, 6, 15),
            true,
        ),
        listing(
            "model-7",
            "CodeCopilot",
            "AI assistant for software development that suggests code snippets and helps solve programming challenges.",
            "DevIntelligence",
            "0x4B3aF9D19E8D98d97B58c10c5fD487a32E44a920",
            dec!(0.6),
            546819,
            4.7,
            93,
            CategoryId::TextGeneration,
            &["code", "programming", "development", "assistance"],
            date(2024, 8, 5),
            true,
        ),
        listing(
            "model-8",
            "VoiceClone",
            "Generate natural-sounding speech in your own voice or choose from hundreds of preset voices.",
            "SpeechLabs",
            "0x2C8950FCb5dE16CDff2dCB6C4dD402fE7D846b71",
            dec!(0.35),
            3829227,
            4.6,
            78,
            CategoryId::AudioGeneration,
            &["voice", "speech", "cloning", "narration"],
            date(2024, 7, 10),
            false,
        ),
    ]
}

fn review(
    id: &str,
    user: u32,
    name: &str,
    avatar: &str,
    rating: u8,
    comment: &str,
    on: NaiveDate,
) -> Review {
    Review {
        id: id.to_string(),
        user_id: format!("user-{}", user),
        user_name: name.to_string(),
        user_avatar: format!("https://randomuser.me/api/portraits/{}.jpg", avatar),
        rating,
        comment: comment.to_string(),
        date: on,
    }
}

pub fn seed_reviews() -> HashMap<String, Vec<Review>> {
    let mut reviews = HashMap::new();
    reviews.insert(
        "model-1".to_string(),
        vec![
            review(
                "review-1",
                1,
                "Alex Johnson",
                "men/32",
                5,
                "Amazing quality! This model produces the most realistic images I've ever seen from AI.",
                date(2024, 9, 23),
            ),
            review(
                "review-2",
                2,
                "Sarah Chen",
                "women/44",
                4,
                "Great results for most of my projects. Occasionally struggles with complex lighting scenarios.",
                date(2024, 9, 15),
            ),
            review(
                "review-3",
                3,
                "Michael Rodriguez",
                "men/67",
                5,
                "Best investment I've made for my design workflow. Saves me hours of work!",
                date(2024, 9, 3),
            ),
        ],
    );
    reviews
}

pub fn seed_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "tx-1".to_string(),
            model_id: "model-1".to_string(),
            model_name: "ImageCraft Pro".to_string(),
            buyer_wallet: "0x1234567890123456789012345678901234567890".to_string(),
            seller_wallet: "0x7c1Ea80e9d343c9613C516BbDa4A7a80323949E6".to_string(),
            price: dec!(0.5),
            currency: "ETH".to_string(),
            timestamp: timestamp("2024-09-28T14:22:10Z"),
            transaction_hash:
                "0xabcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890".to_string(),
        },
        Transaction {
            id: "tx-2".to_string(),
            model_id: "model-3".to_string(),
            model_name: "SoundWave AI".to_string(),
            buyer_wallet: "0xA8902BBb792F169C88957779b53a5506058c4776".to_string(),
            seller_wallet: "0x9F7A946d935c8Efc7A8329C0d8bD46c7f4F936Bf".to_string(),
            price: dec!(0.25),
            currency: "ETH".to_string(),
            timestamp: timestamp("2024-09-27T11:15:43Z"),
            transaction_hash:
                "0xfedcba0987654321fedcba0987654321fedcba0987654321fedcba0987654321".to_string(),
        },
        Transaction {
            id: "tx-3".to_string(),
            model_id: "model-6".to_string(),
            model_name: "CreativeFlow".to_string(),
            buyer_wallet: "0x5541fc129C5262d01461Ff174c45c0D7f2b1C4ef".to_string(),
            seller_wallet: "0x6E8ea9E1A5F9d982Ed900fE0A33F5DF3d4C5b1fA".to_string(),
            price: dec!(0.45),
            currency: "ETH".to_string(),
            timestamp: timestamp("2024-09-26T16:05:22Z"),
            transaction_hash:
                "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef".to_string(),
        },
    ]
}
