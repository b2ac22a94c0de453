
/// A trimmed-down capability file in the shape of the real database.
pub(super) const SAMPLE_FILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wurfl>
<devices>
    <device id="generic" user_agent="" fall_back="root">
        <group id="product_info">
            <capability name="brand_name" value=""/>
            <capability name="model_name" value=""/>
            <capability name="mobile_browser" value=""/>
            <capability name="vendor" value="unknown"/>
        </group>
    </device>
    <device id="nokia_generic_series60" user_agent="Nokia" fall_back="generic">
        <group id="product_info">
            <capability name="brand_name" value="Nokia"/>
            <capability name="mobile_browser" value="Nokia"/>
            <capability name="vendor" value="nokia"/>
        </group>
    </device>
    <device id="nokia.n96.ver1" user_agent="NokiaN96-1" fall_back="nokia_generic_series60" actual_device_root="true">
        <group id="product_info">
            <capability name="model_name" value="N96"/>
        </group>
    </device>
    <device id="3gpp_phone" user_agent="3GPP\Phone" fall_back="generic">
    </device>
</devices>
</wurfl>
"#;
