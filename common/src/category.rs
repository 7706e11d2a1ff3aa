//! 出品カテゴリ（ホワイトリスト）
//!
//! 解析サービスが提案したカテゴリは、この14項目に完全一致した場合のみ採用する。
//! 一致しない場合はドラフトのカテゴリを空にする。

use std::fmt;

/// 出品カテゴリ（表示順固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    OutdoorRecreation,
    HomeAppliances,
    Electronics,
    HomeAndGarden,
    Tools,
    Travel,
    KitchenAppliances,
    Garden,
    WinterEquipment,
    PartySupplies,
    Transportation,
    PetSupplies,
    Fitness,
    HealthAndWellness,
}

/// 全カテゴリ（表示順）
pub const CATEGORIES: [Category; 14] = [
    Category::OutdoorRecreation,
    Category::HomeAppliances,
    Category::Electronics,
    Category::HomeAndGarden,
    Category::Tools,
    Category::Travel,
    Category::KitchenAppliances,
    Category::Garden,
    Category::WinterEquipment,
    Category::PartySupplies,
    Category::Transportation,
    Category::PetSupplies,
    Category::Fitness,
    Category::HealthAndWellness,
];

impl Category {
    /// 表示ラベル（サービスとやり取りする値そのもの）
    pub fn label(&self) -> &'static str {
        match self {
            Category::OutdoorRecreation => "Outdoor Recreation",
            Category::HomeAppliances => "Home Appliances",
            Category::Electronics => "Electronics",
            Category::HomeAndGarden => "Home & Garden",
            Category::Tools => "Tools",
            Category::Travel => "Travel",
            Category::KitchenAppliances => "Kitchen Appliances",
            Category::Garden => "Garden",
            Category::WinterEquipment => "Winter Equipment",
            Category::PartySupplies => "Party Supplies",
            Category::Transportation => "Transportation",
            Category::PetSupplies => "Pet Supplies",
            Category::Fitness => "Fitness",
            Category::HealthAndWellness => "Health & Wellness",
        }
    }

    /// ラベルからカテゴリを取得（完全一致・大文字小文字を区別）
    pub fn from_label(label: &str) -> Option<Self> {
        CATEGORIES.iter().copied().find(|c| c.label() == label)
    }

    /// ホワイトリスト適用: 許可されたラベルならそのまま、それ以外は空文字
    pub fn sanitize(label: &str) -> String {
        Self::from_label(label)
            .map(|c| c.label().to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
