use super::dto::CommonFood;

/// The common Portuguese foods offered as one-tap presets in the add-food
/// dialog. Values are per the stated portion.
pub const COMMON_FOODS: &[CommonFood] = &[
    CommonFood { name: "Pão de trigo (1 fatia)", calories: 80.0, protein: 3.0, carbs: 15.0, fat: 1.0 },
    CommonFood { name: "Arroz branco cozido (100g)", calories: 130.0, protein: 2.7, carbs: 28.0, fat: 0.3 },
    CommonFood { name: "Batata cozida (100g)", calories: 87.0, protein: 2.0, carbs: 20.0, fat: 0.1 },
    CommonFood { name: "Frango grelhado (100g)", calories: 165.0, protein: 31.0, carbs: 0.0, fat: 3.6 },
    CommonFood { name: "Bacalhau cozido (100g)", calories: 82.0, protein: 18.0, carbs: 0.0, fat: 0.7 },
    CommonFood { name: "Ovo cozido (1 unidade)", calories: 78.0, protein: 6.0, carbs: 0.6, fat: 5.0 },
    CommonFood { name: "Queijo fresco (50g)", calories: 70.0, protein: 6.0, carbs: 2.0, fat: 4.0 },
    CommonFood { name: "Iogurte natural (125g)", calories: 75.0, protein: 5.0, carbs: 7.0, fat: 3.0 },
    CommonFood { name: "Banana (1 média)", calories: 105.0, protein: 1.3, carbs: 27.0, fat: 0.4 },
    CommonFood { name: "Maçã (1 média)", calories: 95.0, protein: 0.5, carbs: 25.0, fat: 0.3 },
    CommonFood { name: "Café com leite (200ml)", calories: 60.0, protein: 3.0, carbs: 5.0, fat: 3.0 },
    CommonFood { name: "Pastel de nata (1 unidade)", calories: 200.0, protein: 3.0, carbs: 25.0, fat: 10.0 },
];
