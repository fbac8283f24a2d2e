//! Fixed bilingual text used by the conversation core.

use artdx_core::Language;

/// Greeting injected into an empty transcript.
pub const WELCOME: &str = "Selamat datang di **AI Art Diagnostics Agent**! Saya siap membantu Anda \
menganalisis karya seni. Unggah gambar seni (lukisan, sketsa, dll.) dan tanyakan tentang \
**gaya, periode sejarah, teknik**, atau **potensi autentikasi**. Saya akan memberikan kritik \
visual dan wawasan artistik berdasarkan gambar yang Anda berikan.";

/// Instruction sent with every model request.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert Art Diagnostics Agent. Your primary role \
is to perform visual analysis, artistic criticism, and provide potential authentication insights \
for images uploaded by the user. **CRITICAL RULE: YOU MUST RESPOND IN THE SAME LANGUAGE THE USER \
USED IN THEIR LAST MESSAGE.** You **DO NOT** have any tools. Focus purely on generating the \
analysis text. When the user uploads an image, you MUST confirm the image and then provide a \
detailed analysis of the **style, period, technique, and potential artist**. In EVERY analysis, \
begin your response by referencing the artwork or file, for example: 'Based on the analysis of \
[artwork/file name], ...' or 'Berdasarkan analisis karya [nama file], ...'. Be professional, \
precise, and authoritative in your artistic judgment.";

/// Reply when the user asks for analysis without an uploaded artwork.
pub fn upload_required(language: Language) -> &'static str {
    match language {
        Language::English => "I need an artwork to analyze! Please **Upload the Image** first.",
        Language::Indonesian => {
            "Saya butuh karya seni untuk dianalisis! Silakan **Unggah Gambar** terlebih dahulu."
        }
    }
}

/// Reply when the model call failed.
pub fn model_failure(language: Language, detail: &str) -> String {
    match language {
        Language::English => format!("An error occurred in the Agent: {}", detail),
        Language::Indonesian => format!("Terjadi kesalahan pada *Agent*: {}", detail),
    }
}

/// Prefix an answer with a reference to the analysed file.
pub fn with_analysis_prefix(language: Language, file_name: &str, answer: &str) -> String {
    match language {
        Language::English => format!(
            "Based on the analysis of the artwork '{}', {}",
            file_name, answer
        ),
        Language::Indonesian => format!("Berdasarkan analisis karya seni '{}', {}", file_name, answer),
    }
}

/// Status line shown while the model is working.
pub fn progress(language: Language) -> &'static str {
    match language {
        Language::English => "Art Agent is critiquing and analyzing...",
        Language::Indonesian => "Agen Seni sedang mengkritisi dan menganalisis...",
    }
}

/// Confirmation shown after a new artwork is accepted.
pub fn upload_ready(file_name: &str) -> String {
    format!("File '{}' uploaded and ready for analysis.", file_name)
}
