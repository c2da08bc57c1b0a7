use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, Display, clap::ValueEnum, Hash, PartialEq, Eq, EnumIter)]
pub enum ArtStyle {
    Minimalist,
    Watercolor,
    #[strum(to_string = "Pop Art")]
    PopArt,
    Cyberpunk,
    #[strum(to_string = "Art Nouveau")]
    ArtNouveau,
    Vaporwave,
    Steampunk,
    #[strum(to_string = "Film Noir")]
    Noir,
}

impl ArtStyle {
    /// The value interpolated into prompts and share texts. `Display` gives the label.
    pub fn value(&self) -> &'static str {
        match self {
            ArtStyle::Minimalist => "minimalist",
            ArtStyle::Watercolor => "watercolor",
            ArtStyle::PopArt => "pop art",
            ArtStyle::Cyberpunk => "cyberpunk",
            ArtStyle::ArtNouveau => "art nouveau",
            ArtStyle::Vaporwave => "vaporwave",
            ArtStyle::Steampunk => "steampunk",
            ArtStyle::Noir => "noir",
        }
    }
}

#[derive(Debug, Clone, Copy, Display, clap::ValueEnum, Hash, PartialEq, Eq, EnumIter, Default)]
pub enum Model {
    #[default]
    #[strum(to_string = "DALL-E 3 (Better quality, slower)")]
    #[value(name = "dall-e-3")]
    DallE3,
    #[strum(to_string = "DALL-E 2 (Faster, lower quality)")]
    #[value(name = "dall-e-2")]
    DallE2,
}

impl Model {
    /// Identifier sent to the image API.
    pub fn id(&self) -> &'static str {
        match self {
            Model::DallE3 => "dall-e-3",
            Model::DallE2 => "dall-e-2",
        }
    }
}

/// What the user filled into the form. The credential is kept separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PosterParams {
    pub title: String,
    pub style: Option<ArtStyle>,
    pub model: Model,
}

pub fn build_prompt(title: &str, style: ArtStyle) -> String {
    format!(
        r#"An imaginative poster inspired by the movie "{}" rendered in the {} art style"#,
        title.trim(),
        style.value()
    )
}

/// Every whitespace run (and any path separator) becomes a single `-`, the rest is lower-cased.
/// The title is not trimmed, so leading or trailing whitespace shows up as a hyphen.
pub fn poster_filename(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 11);
    let mut in_run = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_run {
                name.push('-');
            }
            in_run = true;
        } else {
            in_run = false;
            if c == '/' || c == '\\' {
                name.push('-');
            } else {
                name.extend(c.to_lowercase());
            }
        }
    }
    name.push_str("-poster.png");
    name
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn prompt_interpolates_trimmed_title_and_style_value() {
        let expect = expect![[
            r#"An imaginative poster inspired by the movie "Blade Runner" rendered in the cyberpunk art style"#
        ]];
        expect.assert_eq(&build_prompt("  Blade Runner ", ArtStyle::Cyberpunk));

        let expect = expect![[
            r#"An imaginative poster inspired by the movie "Casablanca" rendered in the noir art style"#
        ]];
        expect.assert_eq(&build_prompt("Casablanca", ArtStyle::Noir));
    }

    #[test]
    fn filename_from_title() {
        assert_eq!(poster_filename("The Matrix"), "the-matrix-poster.png");
        assert_eq!(
            poster_filename("Eternal   Sunshine\tof the\n Spotless Mind"),
            "eternal-sunshine-of-the-spotless-mind-poster.png"
        );
        assert_eq!(poster_filename(" Up "), "-up--poster.png");
        assert_eq!(poster_filename("AC/DC Live"), "ac-dc-live-poster.png");
        assert_eq!(poster_filename(""), "-poster.png");
    }

    #[test]
    fn fixed_choices() {
        let styles: Vec<_> = ArtStyle::iter()
            .map(|s| format!("{} = {s}", s.value()))
            .collect();
        let expect = expect![[r#"
            minimalist = Minimalist
            watercolor = Watercolor
            pop art = Pop Art
            cyberpunk = Cyberpunk
            art nouveau = Art Nouveau
            vaporwave = Vaporwave
            steampunk = Steampunk
            noir = Film Noir"#]];
        expect.assert_eq(&styles.join("\n"));

        assert_eq!(Model::iter().count(), 2);
        assert_eq!(Model::default().id(), "dall-e-3");
        assert_eq!(Model::DallE2.id(), "dall-e-2");
    }
}
