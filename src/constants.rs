//! Shared constants for providers and responses
//!

/// Default Hugging Face text-to-image model
pub const DEFAULT_MODEL: &str = "stabilityai/stable-diffusion-xl-base-1.0";

/// Hugging Face inference endpoint, the model id is appended as a path.
pub const HUGGINGFACE_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// RapidAPI text-to-image generation endpoint
pub const RAPIDAPI_GENERATE_URL: &str =
    "https://ai-text-to-image-generator-api.p.rapidapi.com/realistic";

/// Style sent with every RapidAPI generation request.
pub const RAPIDAPI_STYLE_ID: u32 = 4;

/// Widescreen size sent with every RapidAPI generation request.
pub const RAPIDAPI_SIZE: &str = "16-9";

/// JSON pointer to the image URL inside the RapidAPI envelope.
pub const RAPIDAPI_IMAGE_URL_POINTER: &str = "/final_result/0/origin";

/// Marker Hugging Face puts in errors while a cold model spins up.
pub const MODEL_LOADING_MARKER: &str = "is currently loading";

/// Returned to the caller while the model spins up.
pub const MODEL_LOADING_MESSAGE: &str = "Model is loading, please try again in 20-30 seconds.";

/// Returned when no provider could be constructed at startup.
pub const PROVIDER_UNAVAILABLE_MESSAGE: &str = "Inference client not initialized.";

/// Returned when the title is missing or blank.
pub const TITLE_REQUIRED_MESSAGE: &str = "Title is required";

/// Content type of every successful response.
pub const PNG_CONTENT_TYPE: &str = "image/png";
