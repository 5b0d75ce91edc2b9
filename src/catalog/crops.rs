//! Crop identifiers and embedded crop details
//!
//! The closed set of crops the recommender knows about. Labels match the
//! `label` column of the reference dataset.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Canonical crop identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Rice,
    Wheat,
    Maize,
    Chickpea,
    KidneyBeans,
    PigeonPeas,
    MothBeans,
    MungBean,
    BlackGram,
    Lentil,
    Pomegranate,
    Banana,
    Mango,
    Grapes,
    Watermelon,
    Muskmelon,
    Apple,
    Orange,
    Papaya,
    Coconut,
    Cotton,
    Jute,
    Coffee,
}

impl Crop {
    pub const ALL: [Crop; 23] = [
        Crop::Rice,
        Crop::Wheat,
        Crop::Maize,
        Crop::Chickpea,
        Crop::KidneyBeans,
        Crop::PigeonPeas,
        Crop::MothBeans,
        Crop::MungBean,
        Crop::BlackGram,
        Crop::Lentil,
        Crop::Pomegranate,
        Crop::Banana,
        Crop::Mango,
        Crop::Grapes,
        Crop::Watermelon,
        Crop::Muskmelon,
        Crop::Apple,
        Crop::Orange,
        Crop::Papaya,
        Crop::Coconut,
        Crop::Cotton,
        Crop::Jute,
        Crop::Coffee,
    ];

    /// Label as emitted by the classifier
    pub fn label(&self) -> &'static str {
        match self {
            Crop::Rice => "rice",
            Crop::Wheat => "wheat",
            Crop::Maize => "maize",
            Crop::Chickpea => "chickpea",
            Crop::KidneyBeans => "kidneybeans",
            Crop::PigeonPeas => "pigeonpeas",
            Crop::MothBeans => "mothbeans",
            Crop::MungBean => "mungbean",
            Crop::BlackGram => "blackgram",
            Crop::Lentil => "lentil",
            Crop::Pomegranate => "pomegranate",
            Crop::Banana => "banana",
            Crop::Mango => "mango",
            Crop::Grapes => "grapes",
            Crop::Watermelon => "watermelon",
            Crop::Muskmelon => "muskmelon",
            Crop::Apple => "apple",
            Crop::Orange => "orange",
            Crop::Papaya => "papaya",
            Crop::Coconut => "coconut",
            Crop::Cotton => "cotton",
            Crop::Jute => "jute",
            Crop::Coffee => "coffee",
        }
    }

    /// Display text
    pub fn display_name(&self) -> &'static str {
        match self {
            Crop::KidneyBeans => "Kidney Beans",
            Crop::PigeonPeas => "Pigeon Peas",
            Crop::MothBeans => "Moth Beans",
            Crop::MungBean => "Mung Bean",
            Crop::BlackGram => "Black Gram",
            Crop::Rice => "Rice",
            Crop::Wheat => "Wheat",
            Crop::Maize => "Maize",
            Crop::Chickpea => "Chickpea",
            Crop::Lentil => "Lentil",
            Crop::Pomegranate => "Pomegranate",
            Crop::Banana => "Banana",
            Crop::Mango => "Mango",
            Crop::Grapes => "Grapes",
            Crop::Watermelon => "Watermelon",
            Crop::Muskmelon => "Muskmelon",
            Crop::Apple => "Apple",
            Crop::Orange => "Orange",
            Crop::Papaya => "Papaya",
            Crop::Coconut => "Coconut",
            Crop::Cotton => "Cotton",
            Crop::Jute => "Jute",
            Crop::Coffee => "Coffee",
        }
    }

    /// Embedded description text
    pub fn description(&self) -> &'static str {
        match self {
            Crop::Rice => "Rice is a staple food crop that requires high temperatures ranging from 20°C to 30°C, high humidity, and a substantial amount of water for optimal growth. It is typically grown in flooded conditions known as paddies, which help to control weeds and pests. Rice cultivation is labor-intensive, and it thrives in well-drained, fertile soils rich in organic matter. Proper water management is crucial for rice, as it needs consistent moisture throughout its growing season.",
            Crop::Wheat => "Wheat is a major cereal crop that grows best in cool, moist conditions and well-drained soils. It is usually planted in the fall and harvested in the summer. Optimal growth temperatures range from 12°C to 25°C. Wheat requires a period of cold weather to trigger flowering, a process known as vernalization. It is a versatile crop that can be used for various products, including bread, pasta, and cereals. Wheat cultivation benefits from moderate rainfall and deep, loamy soils.",
            Crop::Maize => "Also known as corn, maize is a warm-season crop that prefers temperatures between 18°C and 27°C and requires well-drained, fertile soils. It is one of the most widely grown crops in the world, used for food, fodder, and industrial products. Maize has a high water requirement during its growth period, particularly during the flowering and grain-filling stages. It is sensitive to frost and grows best with moderate rainfall. Maize cultivation benefits from proper weed and pest management.",
            Crop::Chickpea => "Chickpeas are a cool-season legume that thrives in dry conditions and well-drained soils. Optimal growth temperatures range from 21°C to 26°C. Chickpeas are drought-tolerant and require minimal water compared to other crops. They are an excellent source of protein and are used in various culinary dishes worldwide. Chickpeas also have the added benefit of improving soil health by fixing nitrogen, making them an essential crop for sustainable farming.",
            Crop::KidneyBeans => "Kidney beans grow best in moderate temperatures and well-drained, fertile soils. They require a growing season of about 100-140 days and thrive in temperatures ranging from 18°C to 26°C. Kidney beans need consistent moisture, particularly during flowering and pod development stages. They are a rich source of protein, dietary fiber, and essential vitamins and minerals. Proper irrigation and pest management are crucial for a good yield.",
            Crop::PigeonPeas => "Pigeon peas are a warm-season crop that can tolerate poor soils and thrive in temperatures between 20°C and 35°C. They are drought-resistant and can be grown in semi-arid regions. Pigeon peas are an important source of protein and are used in various traditional dishes in tropical and subtropical regions. The crop also helps in improving soil fertility through nitrogen fixation.",
            Crop::MothBeans => "Moth beans prefer hot, arid climates and sandy soils. They are highly drought-resistant and can grow in regions with minimal rainfall. Optimal growth temperatures range from 25°C to 35°C. Moth beans are a good source of protein and are often used in traditional Indian cuisine. They require minimal inputs and are suitable for cultivation in marginal lands.",
            Crop::MungBean => "Mung beans need warm weather and well-drained, fertile soils. They thrive in temperatures between 25°C and 35°C. Mung beans are fast-growing and typically mature within 60-75 days. They are rich in protein and essential nutrients, making them a valuable crop for both human consumption and soil improvement through nitrogen fixation.",
            Crop::BlackGram => "Black gram grows well in warm, moist conditions and well-drained soils. It prefers temperatures between 25°C and 30°C. Black gram is a short-duration crop, typically maturing in 70-90 days. It is a significant source of protein and is widely used in various culinary dishes, particularly in South Asia. The crop also contributes to soil fertility through nitrogen fixation.",
            Crop::Lentil => "Lentils thrive in cool, dry conditions and well-drained soils. Optimal growth temperatures range from 18°C to 30°C. Lentils are highly nutritious, providing protein, fiber, and essential micronutrients. They have a relatively short growing season of about 80-110 days. Lentils improve soil health by fixing nitrogen and are an essential crop in crop rotation systems.",
            Crop::Pomegranate => "Pomegranates require hot, dry climates and well-drained soils. They thrive in temperatures ranging from 20°C to 35°C and can tolerate drought conditions. Pomegranates are known for their high nutritional value, providing vitamins, minerals, and antioxidants. The crop requires proper irrigation during the flowering and fruit development stages to ensure good yields. Pomegranate cultivation also benefits from good pest and disease management practices.",
            Crop::Banana => "Bananas need high temperatures (around 26°C to 30°C) and high humidity for optimal growth. They require plenty of water but must be planted in well-drained soils to prevent waterlogging. Bananas are fast-growing, typically reaching maturity within 9-12 months. They are rich in carbohydrates, vitamins, and minerals. Proper irrigation and nutrient management are essential for healthy banana production.",
            Crop::Mango => "Mangoes thrive in hot weather with well-drained soils. Optimal growth temperatures range from 24°C to 27°C. Mangoes are highly valued for their delicious, nutrient-rich fruits, providing vitamins A and C. The crop requires adequate water during flowering and fruit development stages. Mango trees benefit from regular pruning and pest management to ensure healthy growth and good yields.",
            Crop::Grapes => "Grapes prefer warm, dry climates and well-drained soils. They thrive in temperatures between 15°C and 30°C. Grapes are used for fresh consumption, wine production, and dried products like raisins. Proper irrigation, trellising, and pruning are essential for maintaining vine health and productivity. Grapes require careful management of pests and diseases to ensure high-quality fruit production.",
            Crop::Watermelon => "Watermelons need hot weather and sandy, well-drained soils. They grow best in temperatures between 25°C and 30°C. Watermelons are rich in vitamins, minerals, and antioxidants, making them a popular summer fruit. The crop requires consistent moisture, especially during the fruit development stage. Watermelons benefit from proper spacing and pest management to ensure healthy growth.",
            Crop::Muskmelon => "Muskmelons, also known as cantaloupes, grow best in warm weather and sandy, well-drained soils. Optimal growth temperatures range from 24°C to 30°C. Muskmelons are rich in vitamins A and C and provide a sweet, nutritious fruit. The crop requires adequate water, particularly during flowering and fruit development stages. Muskmelons benefit from proper weed and pest management practices.",
            Crop::Apple => "Apples need cool to cold weather and well-drained soils. They thrive in temperatures ranging from 18°C to 24°C. Apples are rich in dietary fiber, vitamins, and antioxidants. The crop requires a period of cold weather to break dormancy and promote flowering, a process known as chilling. Apples benefit from proper pruning, pest management, and irrigation practices.",
            Crop::Orange => "Oranges prefer warm climates and well-drained soils. Optimal growth temperatures range from 15°C to 30°C. Oranges are an excellent source of vitamin C and other essential nutrients. The crop requires adequate water during flowering and fruit development stages. Oranges benefit from proper irrigation, pruning, and pest management practices to ensure healthy growth and high-quality fruit production.",
            Crop::Papaya => "Papayas require warm weather and well-drained soils. They thrive in temperatures between 21°C and 33°C. Papayas are rich in vitamins A and C, making them a nutritious fruit choice. The crop requires consistent moisture, particularly during the flowering and fruit development stages. Papayas benefit from proper spacing, pest management, and nutrient management practices.",
            Crop::Coconut => "Coconuts thrive in hot, humid climates and sandy, well-drained soils. Optimal growth temperatures range from 27°C to 32°C. Coconuts provide a versatile crop used for food, oil, and other products. The crop requires consistent moisture and benefits from regular fertilization and pest management practices. Coconuts are highly tolerant of saline soils and coastal conditions.",
            Crop::Cotton => "Cotton grows well in warm weather and well-drained, fertile soils. Optimal growth temperatures range from 20°C to 30°C. Cotton is a major fiber crop used in textile production. The crop requires adequate water during flowering and boll development stages. Cotton benefits from proper pest management, particularly to control boll weevils and other pests.",
            Crop::Jute => "Jute requires warm, humid climates and well-drained, fertile soils. Optimal growth temperatures range from 24°C to 37°C. Jute is primarily grown for its fiber, which is used in making burlap, hessian, and other products. The crop requires adequate water and benefits from regular weeding and pest management practices.",
            Crop::Coffee => "Coffee grows best in cool to warm climates and well-drained soils. Optimal growth temperatures range from 15°C to 24°C. Coffee is a major global commodity, providing a stimulant beverage enjoyed worldwide. The crop requires adequate shade, proper irrigation, and pest management to ensure healthy growth and high-quality bean production. Coffee plants benefit from regular pruning and nutrient management practices.",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label did not name a known crop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl FromStr for Crop {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Crop::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip_for_every_crop() {
        for crop in Crop::ALL {
            assert_eq!(crop.label().parse::<Crop>(), Ok(crop));
        }
        assert_eq!("quinoa".parse::<Crop>(), Err(UnknownLabel("quinoa".to_string())));
        // Labels are case-sensitive, as emitted by the classifier
        assert!("Rice".parse::<Crop>().is_err());
    }

    #[test]
    fn test_every_crop_has_its_own_description() {
        let mut seen = std::collections::HashSet::new();
        for crop in Crop::ALL {
            let description = crop.description();
            assert!(!description.trim().is_empty(), "{} has no description", crop);
            assert!(seen.insert(description), "{} shares a description", crop);
        }
        assert!(Crop::Jute.description().starts_with("Jute requires"));
        assert!(Crop::MungBean.description().starts_with("Mung beans"));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Crop::KidneyBeans.display_name(), "Kidney Beans");
        assert_eq!(Crop::KidneyBeans.label(), "kidneybeans");
        assert_eq!(Crop::Coffee.to_string(), "coffee");
    }
}
