use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Capitalized words that start sentences, head sections or name
/// institutions in paper front matter, English and Spanish.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Articles, prepositions, conjunctions
        "A", "An", "And", "As", "At", "By", "For", "From", "In", "Into", "Of", "On", "Or",
        "The", "This", "That", "These", "Those", "To", "We", "Our", "With", "Via",
        "El", "La", "Los", "Las", "Un", "Una", "De", "Del", "En", "Por", "Para", "Con", "Y",
        // Front-matter headings
        "Abstract", "Introduction", "Summary", "Keywords", "Index", "Terms", "Background",
        "Resumen", "Introducción", "Palabras", "Clave", "Conclusion", "Conclusions",
        "References", "Acknowledgments", "Acknowledgements", "Figure", "Table", "Section",
        "Appendix", "Copyright", "Received", "Accepted", "Published", "Available", "Online",
        "Corresponding", "Author", "Authors", "Email", "Vol", "Volume", "Issue",
        // Institutions and venues
        "University", "Universidad", "Universitat", "Universität", "Université", "College",
        "Institute", "Instituto", "Department", "Departamento", "Faculty", "Facultad",
        "School", "Escuela", "Center", "Centre", "Centro", "Laboratory", "Laboratorio", "Lab",
        "Research", "Science", "Sciences", "Ciencias", "Engineering", "Ingeniería",
        "Technology", "Tecnología", "National", "Nacional", "International", "Internacional",
        "Proceedings", "Journal", "Revista", "Conference", "Congreso", "Symposium",
        "Workshop", "Actas", "Press", "Society", "Association", "Foundation", "Inc", "Ltd",
        // Months
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December", "Enero", "Febrero", "Marzo", "Abril",
        "Mayo", "Junio", "Julio", "Agosto", "Septiembre", "Octubre", "Noviembre", "Diciembre",
    ]
    .into_iter()
    .collect()
});

pub(crate) fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}
