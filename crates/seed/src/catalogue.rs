use common::Layer;

/// One listing in the sample universe.
#[derive(Debug, Clone, Copy)]
pub struct Listing {
    pub symbol: &'static str,
    pub name: &'static str,
    pub exchange: &'static str,
    pub sector: &'static str,
    pub layer: Layer,
}

const fn listing(
    symbol: &'static str,
    name: &'static str,
    exchange: &'static str,
    sector: &'static str,
    layer: Layer,
) -> Listing {
    Listing { symbol, name, exchange, sector, layer }
}

pub const LISTINGS: [Listing; 49] = [
    listing("VCB", "Vietcombank", "HOSE", "NGANHANG", Layer::Bluechip),
    listing("BID", "BIDV", "HOSE", "NGANHANG", Layer::Bluechip),
    listing("CTG", "VietinBank", "HOSE", "NGANHANG", Layer::Bluechip),
    listing("TCB", "Techcombank", "HOSE", "NGANHANG", Layer::Bluechip),
    listing("MBB", "MB Bank", "HOSE", "NGANHANG", Layer::Bluechip),
    listing("ACB", "Asia Commercial Bank", "HOSE", "NGANHANG", Layer::Midcap),
    listing("VPB", "VPBank", "HOSE", "NGANHANG", Layer::Midcap),
    listing("TPB", "TPBank", "HOSE", "NGANHANG", Layer::Midcap),
    listing("HDB", "HDBank", "HOSE", "NGANHANG", Layer::Midcap),
    listing("STB", "Sacombank", "HOSE", "NGANHANG", Layer::Penny),

    listing("VHM", "Vinhomes", "HOSE", "BDS", Layer::Bluechip),
    listing("VIC", "Vingroup", "HOSE", "BDS", Layer::Bluechip),
    listing("NVL", "Novaland", "HOSE", "BDS", Layer::Midcap),
    listing("VRE", "Vincom Retail", "HOSE", "BDS", Layer::Midcap),
    listing("DXG", "Dat Xanh Group", "HOSE", "BDS", Layer::Midcap),
    listing("PDR", "Phat Dat Real Estate", "HOSE", "BDS", Layer::Penny),
    listing("KDH", "Khang Dien House", "HOSE", "BDS", Layer::Penny),
    listing("DIG", "DIC Corp", "HOSE", "BDS", Layer::Penny),

    listing("SSI", "SSI Securities", "HOSE", "CHUNGKHOAN", Layer::Midcap),
    listing("VND", "VNDirect Securities", "HOSE", "CHUNGKHOAN", Layer::Midcap),
    listing("HCM", "Ho Chi Minh Securities", "HOSE", "CHUNGKHOAN", Layer::Midcap),
    listing("VCI", "Vietcap Securities", "HOSE", "CHUNGKHOAN", Layer::Penny),
    listing("FTS", "FPT Securities", "HOSE", "CHUNGKHOAN", Layer::Penny),

    listing("HPG", "Hoa Phat Group", "HOSE", "THEP", Layer::Bluechip),
    listing("HSG", "Hoa Sen Group", "HOSE", "THEP", Layer::Midcap),
    listing("NKG", "Nam Kim Steel", "HOSE", "THEP", Layer::Midcap),
    listing("POM", "Pomina Steel", "HNX", "THEP", Layer::Penny),

    listing("GAS", "PetroVietnam Gas", "HOSE", "DAUKI", Layer::Bluechip),
    listing("PLX", "Petrolimex", "HOSE", "DAUKI", Layer::Bluechip),
    listing("PVD", "PetroVietnam Drilling", "HOSE", "DAUKI", Layer::Midcap),
    listing("PVS", "PetroVietnam Technical Services", "HOSE", "DAUKI", Layer::Midcap),
    listing("PVT", "PetroVietnam Transportation", "HOSE", "DAUKI", Layer::Penny),
    listing("GMD", "Gemadept", "HOSE", "DAUKI", Layer::Penny),

    listing("POW", "PetroVietnam Power", "HOSE", "DIEN", Layer::Midcap),
    listing("NT2", "Nhon Trach 2 Power", "HOSE", "DIEN", Layer::Midcap),
    listing("REE", "Refrigeration Electrical Engineering", "HOSE", "DIEN", Layer::Midcap),
    listing("PC1", "Power Construction No.1", "HNX", "DIEN", Layer::Penny),

    listing("VNM", "Vinamilk", "HOSE", "THUCPHAM", Layer::Bluechip),
    listing("MSN", "Masan Group", "HOSE", "THUCPHAM", Layer::Bluechip),
    listing("SAB", "Sabeco", "HOSE", "THUCPHAM", Layer::Bluechip),
    listing("VHC", "Vinh Hoan", "HOSE", "THUCPHAM", Layer::Midcap),
    listing("MCH", "Masan Consumer Holdings", "HOSE", "THUCPHAM", Layer::Midcap),
    listing("KDC", "Kido Group", "HOSE", "THUCPHAM", Layer::Penny),

    listing("FPT", "FPT Corporation", "HOSE", "CONGNGHE", Layer::Bluechip),
    listing("MWG", "Mobile World", "HOSE", "CONGNGHE", Layer::Bluechip),
    listing("CMG", "CMC Corporation", "HOSE", "CONGNGHE", Layer::Midcap),
    listing("VGI", "Viettel Global", "UPCOM", "CONGNGHE", Layer::Midcap),
    listing("VJC", "VietJet Air", "HOSE", "CONGNGHE", Layer::Midcap),
    listing("ELC", "LILAMA Electro-Mechanical", "HOSE", "CONGNGHE", Layer::Penny),
];

/// Industry name for a sector code.
pub fn industry_of(sector: &str) -> &'static str {
    match sector {
        "BDS" => "Real Estate",
        "NGANHANG" => "Banking",
        "CHUNGKHOAN" => "Securities",
        "THEP" => "Steel",
        "DAUKI" => "Oil & Gas",
        "DIEN" => "Energy",
        "THUCPHAM" => "Food & Beverage",
        "CONGNGHE" => "Technology",
        _ => "Other",
    }
}
