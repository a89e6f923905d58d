use advisory::{RequiredFields, ValidationError};
use clap::Parser;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("krishi").chain(args.iter().copied())).unwrap()
}

// =============================================================================
// Argument parsing
// =============================================================================

#[test]
fn base_url_defaults_to_local_inference_api() {
    let cli = parse(&["ping"]);
    assert_eq!(cli.base_url, advisory::DEFAULT_BASE_URL);
    assert!(!cli.json);
}

#[test]
fn json_flag_is_global() {
    let cli = parse(&["ask", "--json", "what", "to", "plant?"]);
    assert!(cli.json);
    let Command::Ask { question } = cli.command else {
        panic!("expected ask");
    };
    assert_eq!(question.join(" "), "what to plant?");
}

#[test]
fn crop_args_map_to_params_in_wire_order() {
    let cli = parse(&[
        "recommend-crop",
        "--n", "90", "--p", "42", "--k", "43",
        "--temperature", "20.8", "--humidity", "82", "--ph", "6.5", "--rainfall", "202",
    ]);
    let Command::RecommendCrop(args) = cli.command else {
        panic!("expected recommend-crop");
    };
    let params = CropParams::from(args);
    assert!(params.validate().is_ok());
    let body = serde_json::to_value(&params).unwrap();
    assert_eq!(body["N"], "90");
    assert_eq!(body["rainfall"], "202");
}

#[test]
fn missing_fertilizer_field_fails_validation_locally() {
    let cli = parse(&["recommend-fertilizer", "--temperature", "26", "--humidity", "52"]);
    let Command::RecommendFertilizer(args) = cli.command else {
        panic!("expected recommend-fertilizer");
    };
    assert_eq!(FertilizerParams::from(args).validate(), Err(ValidationError::MissingField("moisture")));
}

#[test]
fn nutrient_long_aliases_accepted() {
    let cli = parse(&["recommend-crop", "--nitrogen", "1", "--phosphorus", "2", "--potassium", "3"]);
    let Command::RecommendCrop(args) = cli.command else {
        panic!("expected recommend-crop");
    };
    assert_eq!((args.nitrogen.as_str(), args.phosphorus.as_str(), args.potassium.as_str()), ("1", "2", "3"));
}

#[test]
fn ask_requires_a_question() {
    assert!(Cli::try_parse_from(["krishi", "ask"]).is_err());
}

// =============================================================================
// read_image
// =============================================================================

#[tokio::test]
async fn read_image_missing_file_names_path() {
    let err = read_image(Path::new("/definitely/not/here.jpg")).await.unwrap_err();
    assert!(err.to_string().starts_with("cannot read /definitely/not/here.jpg"));
}

#[tokio::test]
async fn read_image_guesses_content_type_from_extension() {
    let path = std::env::temp_dir().join(format!("krishi-cli-test-{}.png", std::process::id()));
    tokio::fs::write(&path, [0x89, b'P', b'N', b'G']).await.unwrap();
    let upload = read_image(&path).await.unwrap();
    let _ = tokio::fs::remove_file(&path).await;
    assert_eq!(upload.content_type, "image/png");
    assert_eq!(upload.bytes.len(), 4);
    assert!(upload.file_name.ends_with(".png"));
}
