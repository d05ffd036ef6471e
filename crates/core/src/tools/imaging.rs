//! Image generation and editing tools.
//!
//! Single-image tools take the photo to transform; two-image tools take the
//! images in the order the prompt refers to them.

use super::Toolbox;
use crate::error::Result;
use crate::media::InlineImage;

impl Toolbox {
    pub async fn generate_image(&self, description: &str, style: &str) -> Result<InlineImage> {
        let prompt = format!("Generate a high-quality image of {description}. Style: {style}.");
        self.dispatcher()
            .generate_image(prompt, &[], "Failed to generate image. Please try again.")
            .await
    }

    pub async fn generate_logo(&self, brand: &str, style: &str) -> Result<InlineImage> {
        let prompt = format!(
            "Design a clean, professional logo for a brand called \"{brand}\". Style: {style}. \
             Plain white background, no mockup."
        );
        self.dispatcher()
            .generate_image(prompt, &[], "Failed to generate logo. Please try again.")
            .await
    }

    pub async fn edit_image(&self, image: &InlineImage, instruction: &str) -> Result<InlineImage> {
        let prompt = format!("Edit this image as follows: {instruction}. Keep everything else unchanged.");
        self.dispatcher()
            .generate_image(prompt, std::slice::from_ref(image), "Failed to edit image. Please try again.")
            .await
    }

    pub async fn remove_background(&self, image: &InlineImage) -> Result<InlineImage> {
        let prompt = "Remove the background from this image. Keep the main subject exactly as it is \
                      and place it on a plain white background."
            .to_string();
        self.dispatcher()
            .generate_image(prompt, std::slice::from_ref(image), "Failed to remove background. Please try again.")
            .await
    }

    pub async fn colorize_photo(&self, image: &InlineImage) -> Result<InlineImage> {
        let prompt = "Colorize this black and white photo with natural, realistic colors. \
                      Do not change the composition."
            .to_string();
        self.dispatcher()
            .generate_image(prompt, std::slice::from_ref(image), "Failed to colorize photo. Please try again.")
            .await
    }

    pub async fn restyle_image(&self, image: &InlineImage, style: &str) -> Result<InlineImage> {
        let prompt = format!("Redraw this image in the style of {style}, keeping the same subject and composition.");
        self.dispatcher()
            .generate_image(prompt, std::slice::from_ref(image), "Failed to apply style. Please try again.")
            .await
    }

    pub async fn sketch_to_image(&self, sketch: &InlineImage, description: &str) -> Result<InlineImage> {
        let prompt = format!(
            "Turn this rough sketch into a detailed, realistic image. What it shows: {description}."
        );
        self.dispatcher()
            .generate_image(prompt, std::slice::from_ref(sketch), "Failed to render sketch. Please try again.")
            .await
    }

    /// Puts the face from `source` onto the person in `target`.
    pub async fn face_swap(&self, source: &InlineImage, target: &InlineImage) -> Result<InlineImage> {
        let prompt = "Take the face from the first image and place it onto the person in the second \
                      image. Match skin tone, lighting and angle so the result looks natural."
            .to_string();
        self.dispatcher()
            .generate_image(
                prompt,
                &[source.clone(), target.clone()],
                "Failed to swap faces. Please try again.",
            )
            .await
    }

    /// Dresses the person in `person` with the garment shown in `garment`.
    pub async fn virtual_try_on(&self, person: &InlineImage, garment: &InlineImage) -> Result<InlineImage> {
        let prompt = "Show the person in the first image wearing the clothing item from the second \
                      image. Keep the person's pose, face and background unchanged."
            .to_string();
        self.dispatcher()
            .generate_image(
                prompt,
                &[person.clone(), garment.clone()],
                "Failed to generate try-on image. Please try again.",
            )
            .await
    }
}
